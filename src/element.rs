//! Grammar element trees.
//!
//! A grammar is described bottom-up as a tree of [`Element`]s: terminal
//! leaves plus three composite kinds. [`Alternation`] is a one-of-N choice,
//! [`Concatenation`] an all-of-N sequence and [`Repetition`] wraps a single
//! element with an inclusive repeat-count range.
//!
//! Composite nodes compare structurally on their payload. Attached actions
//! and getters, an alternation's `ordered` flag and a concatenation's
//! captured separator take no part in equality.
//!
//! # Example
//!
//! ```
//! # use grammar::{Alternation, Concatenation, Repeatable};
//! // value ::= number | string
//! let value = Alternation::new(["number", "string"]);
//!
//! // values ::= value+
//! let values = value.one_or_more();
//!
//! // assignment ::= identifier "=" values ";"
//! let mut assignment = Concatenation::new(["identifier", "="]);
//! assignment.append(values);
//! assignment.append(";");
//! assert_eq!(assignment.len(), 4);
//! ```

use std::ops::{
    BitOr,
    Index,
};

use derivative::Derivative;

use crate::{
    node::{
        Meta,
        Node,
        Value,
    },
    Error,
};

/// One unit of a grammar tree.
///
/// Terminals are opaque leaf values, matched verbatim by the consuming
/// engine; all structure lives in the three composite kinds.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum Element {
    Terminal(String),
    Alternation(Alternation),
    Concatenation(Concatenation),
    Repetition(Repetition),
}

impl Element {
    /// Returns the sub-element at `index`.
    ///
    /// Terminals have no sub-elements; the composite kinds follow their own
    /// indexing rules.
    pub fn get(&self, index: usize) -> Option<&Element> {
        match self {
            Self::Terminal(_) => None,
            Self::Alternation(alternation) => alternation.get(index),
            Self::Concatenation(concatenation) => concatenation.get(index),
            Self::Repetition(repetition) => repetition.get(index),
        }
    }

    /// Whether the contained node has a getter registered under `name`.
    ///
    /// Terminals carry no decorations.
    pub fn has_getter(&self, name: &str) -> bool {
        match self {
            Self::Terminal(_) => false,
            Self::Alternation(alternation) => alternation.has_getter(name),
            Self::Concatenation(concatenation) => concatenation.has_getter(name),
            Self::Repetition(repetition) => repetition.has_getter(name),
        }
    }

    /// Returns the value of the named attribute of the contained node.
    pub fn get_attribute(&mut self, name: &str) -> Result<Value, Error> {
        match self {
            Self::Terminal(_) => Err(Error::UnknownAttribute(name.to_owned())),
            Self::Alternation(alternation) => alternation.get_attribute(name),
            Self::Concatenation(concatenation) => concatenation.get_attribute(name),
            Self::Repetition(repetition) => repetition.get_attribute(name),
        }
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::Terminal(value.to_owned())
    }
}

impl From<char> for Element {
    fn from(value: char) -> Self {
        Self::Terminal(value.to_string())
    }
}

impl Index<usize> for Element {
    type Output = Element;

    /// # Panics
    ///
    /// Panics if the element is a terminal or `index` is out of bounds. Use
    /// [`Element::get`] for the non-panicking form.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("no sub-element at index {}", index))
    }
}

/// Derived repetition constructors for elements that may be repeated.
///
/// Implemented by [`Alternation`] and [`Concatenation`]. Terminals and
/// repetitions are wrapped through the [`Repetition`] factories instead.
pub trait Repeatable: Into<Element> + Sized {
    /// Zero or more repetitions of `self`.
    fn any(self) -> Repetition {
        Repetition::any(self)
    }

    /// At least `minimum` repetitions of `self`, unbounded above.
    fn at_least(self, minimum: usize) -> Repetition {
        Repetition::at_least(self, minimum)
    }

    /// One or more repetitions of `self`.
    fn one_or_more(self) -> Repetition {
        Repetition::one_or_more(self)
    }

    /// Zero or one occurrence of `self`.
    fn optional(self) -> Repetition {
        Repetition::optional(self)
    }
}

impl Repeatable for Alternation {}

impl Repeatable for Concatenation {}

/// A one-of-N choice among child elements.
///
/// The `ordered` flag records whether alternatives are meant to be tried in
/// the given order; acting on it is the consuming engine's concern.
#[derive(Clone, Default, Derivative)]
#[derivative(Debug, PartialEq)]
pub struct Alternation {
    elements: Vec<Element>,
    #[derivative(PartialEq = "ignore")]
    ordered: bool,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    meta: Meta<Self>,
}

impl Eq for Alternation {}

impl Alternation {
    /// Creates an unordered choice of `elements`.
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            ordered: false,
            meta: Meta::default(),
        }
    }

    /// Creates a choice whose alternatives are tried in the given order.
    pub fn ordered<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self {
            ordered: true,
            ..Self::new(elements)
        }
    }

    /// Appends `item` to the alternatives.
    pub fn append(&mut self, item: impl Into<Element>) {
        self.elements.push(item.into());
    }

    /// The alternatives, in the order given.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether alternatives are meant to be tried in the given order.
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Returns the alternative at `index`.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }
}

impl Node for Alternation {
    fn meta(&self) -> &Meta<Self> {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta<Self> {
        &mut self.meta
    }
}

impl Index<usize> for Alternation {
    type Output = Element;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

/// An all-of-N sequence of child elements.
///
/// A concatenation built through a [`Builder`](crate::Builder) captures the
/// builder's implicit separator at construction time as matching guidance
/// for the consuming engine. The snapshot is fixed for the node's lifetime.
#[derive(Clone, Default, Derivative)]
#[derivative(Debug, PartialEq)]
pub struct Concatenation {
    elements: Vec<Element>,
    #[derivative(PartialEq = "ignore")]
    separator: Option<Box<Element>>,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    meta: Meta<Self>,
}

impl Eq for Concatenation {}

impl Concatenation {
    /// Creates a sequence of `elements` with no implicit separator.
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self::with_separator(elements.into_iter().map(Into::into).collect(), None)
    }

    pub(crate) fn with_separator(elements: Vec<Element>, separator: Option<Element>) -> Self {
        Self {
            elements,
            separator: separator.map(Box::new),
            meta: Meta::default(),
        }
    }

    /// Appends `item` to the sequence.
    ///
    /// Attribute values already cached on this node stay as they are; see
    /// [`Node::get_attribute`].
    pub fn append(&mut self, item: impl Into<Element>) {
        self.elements.push(item.into());
    }

    /// The child elements, in sequence order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The implicit separator captured at construction time.
    pub fn separator(&self) -> Option<&Element> {
        self.separator.as_deref()
    }

    /// Returns the child element at `index`.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }
}

impl Node for Concatenation {
    fn meta(&self) -> &Meta<Self> {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta<Self> {
        &mut self.meta
    }
}

impl Index<usize> for Concatenation {
    type Output = Element;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

/// Combines two patterns into an unordered choice, keeping operand order.
impl<R> BitOr<R> for Concatenation
where
    R: Into<Element>,
{
    type Output = Alternation;

    fn bitor(self, rhs: R) -> Alternation {
        Alternation::new([Element::from(self), rhs.into()])
    }
}

impl BitOr<Concatenation> for Element {
    type Output = Alternation;

    fn bitor(self, rhs: Concatenation) -> Alternation {
        Alternation::new([self, rhs.into()])
    }
}

impl BitOr<Concatenation> for &str {
    type Output = Alternation;

    fn bitor(self, rhs: Concatenation) -> Alternation {
        Alternation::new([Element::from(self), rhs.into()])
    }
}

/// A single wrapped element with an inclusive repeat-count range.
#[derive(Clone, Derivative)]
#[derivative(Debug, PartialEq)]
pub struct Repetition {
    element: Box<Element>,
    maximum: Option<usize>,
    minimum: usize,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    meta: Meta<Self>,
}

impl Eq for Repetition {}

impl Repetition {
    /// Wraps `element` with an inclusive repeat-count range.
    ///
    /// `None` as `maximum` means unbounded. The bounds are recorded as
    /// given; `minimum <= maximum` is not enforced.
    pub fn new(element: impl Into<Element>, maximum: Option<usize>, minimum: usize) -> Self {
        Self {
            element: Box::new(element.into()),
            maximum,
            minimum,
            meta: Meta::default(),
        }
    }

    /// Zero or more repetitions of `element`.
    pub fn any(element: impl Into<Element>) -> Self {
        Self::new(element, None, 0)
    }

    /// At least `minimum` repetitions of `element`, unbounded above.
    pub fn at_least(element: impl Into<Element>, minimum: usize) -> Self {
        Self::new(element, None, minimum)
    }

    /// One or more repetitions of `element`.
    pub fn one_or_more(element: impl Into<Element>) -> Self {
        Self::at_least(element, 1)
    }

    /// Zero or one occurrence of `element`.
    pub fn optional(element: impl Into<Element>) -> Self {
        Self::new(element, Some(1), 0)
    }

    /// The wrapped element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The inclusive upper bound; `None` means unbounded.
    pub fn maximum(&self) -> Option<usize> {
        self.maximum
    }

    /// The inclusive lower bound.
    pub fn minimum(&self) -> usize {
        self.minimum
    }

    /// Whether this is a zero-or-one repetition.
    pub fn is_optional(&self) -> bool {
        self.maximum == Some(1) && self.minimum == 0
    }

    /// Returns the sub-element at `index` of the wrapped element.
    ///
    /// A repetition models a pattern, not an unrolled sequence; indexing
    /// reaches into the one repeated element, never into repetition
    /// instances.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.element.get(index)
    }
}

impl Node for Repetition {
    fn meta(&self) -> &Meta<Self> {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta<Self> {
        &mut self.meta
    }
}

impl Index<usize> for Repetition {
    type Output = Element;

    fn index(&self, index: usize) -> &Self::Output {
        &self.element[index]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn it_appends_to_alternations() {
        let mut alternation = Alternation::default();
        alternation.append("abc");
        assert_eq!(alternation, Alternation::new(["abc"]));
    }

    #[test]
    fn it_appends_to_concatenations() {
        let mut concatenation = Concatenation::default();
        concatenation.append("abc");
        assert_eq!(concatenation, Concatenation::new(["abc"]));
    }

    #[test]
    fn it_converts_values_into_elements() {
        assert_eq!(Element::from("abc"), Element::Terminal("abc".to_owned()));
        assert_eq!(Element::from(','), Element::Terminal(",".to_owned()));
        assert_eq!(
            Element::from(Alternation::new(["a", "b"])),
            Element::Alternation(Alternation::new(["a", "b"])),
        );
    }

    #[test]
    fn it_preserves_element_order() {
        let concatenation = Concatenation::new(["a", "b"]);
        assert_eq!(concatenation.len(), 2);
        assert_eq!(concatenation[0], Element::from("a"));
        assert_eq!(concatenation[1], Element::from("b"));

        let mut appended = Concatenation::new(["a", "b"]);
        appended.append("c");
        assert_eq!(appended[2], Element::from("c"));

        let alternation = Alternation::new(["a", "b"]);
        assert_eq!(
            alternation.elements(),
            &[Element::from("a"), Element::from("b")],
        );
    }

    #[test]
    fn it_ignores_decorations_in_equality() {
        let plain = Concatenation::new(["abc", "def"]);
        let decorated = Concatenation::new(["abc", "def"])
            .with_action(|_: &Concatenation| {})
            .with_attribute("first", |_: &Concatenation| Value::Integer(42));
        assert_eq!(plain, decorated);
    }

    #[test]
    fn it_ignores_cached_values_in_equality() {
        let plain = Concatenation::new(["abc", "def"]);
        let mut decorated = Concatenation::new(["abc", "def"]).with_attribute(
            "len",
            |node: &Concatenation| Value::Integer(node.len() as i64),
        );

        decorated.get_attribute("len").unwrap();
        assert_eq!(decorated, plain);
        assert_eq!(plain, decorated);
    }

    #[test]
    fn it_ignores_the_ordered_flag_in_equality() {
        assert_eq!(Alternation::new(["a", "b"]), Alternation::ordered(["a", "b"]));
        assert!(Alternation::ordered(["a"]).is_ordered());
        assert!(!Alternation::new(["a"]).is_ordered());
    }

    #[test]
    fn it_ignores_the_separator_in_equality() {
        let bare = Concatenation::new(["a", "b"]);
        let separated = Concatenation::with_separator(
            vec![Element::from("a"), Element::from("b")],
            Some(Element::from(",")),
        );
        assert_eq!(bare, separated);
        assert_eq!(separated.separator(), Some(&Element::from(",")));
    }

    #[test]
    fn it_accepts_composite_separators() {
        let separator = Element::from(Concatenation::new([",", " "]));
        let separated = Concatenation::with_separator(
            vec![Element::from("a"), Element::from("b")],
            Some(separator.clone()),
        );
        assert_eq!(separated.separator(), Some(&separator));
    }

    #[test]
    fn it_distinguishes_element_kinds() {
        assert_ne!(
            Element::from(Alternation::new(["a"])),
            Element::from(Concatenation::new(["a"])),
        );
        assert_ne!(Element::from("a"), Element::from(Concatenation::new(["a"])));
    }

    #[test]
    fn it_builds_repetitions_through_factories() {
        assert_eq!(Repetition::any("abc"), Repetition::new("abc", None, 0));
        assert_eq!(Repetition::at_least("abc", 5), Repetition::new("abc", None, 5));
        assert_eq!(Repetition::one_or_more("abc"), Repetition::new("abc", None, 1));
        assert_eq!(Repetition::optional("abc"), Repetition::new("abc", Some(1), 0));
    }

    #[test]
    fn it_repeats_alternations_and_concatenations() {
        let choice = Alternation::new(["abc", "def"]);
        assert_eq!(choice.clone().any(), Repetition::any(choice.clone()));
        assert_eq!(choice.clone().at_least(5), Repetition::at_least(choice.clone(), 5));
        assert_eq!(choice.clone().one_or_more(), Repetition::one_or_more(choice.clone()));
        assert_eq!(choice.clone().optional(), Repetition::optional(choice));

        let sequence = Concatenation::new(["abc", "def"]);
        assert_eq!(sequence.clone().any(), Repetition::any(sequence));
    }

    #[test]
    fn it_records_bounds_as_given() {
        let repetition = Repetition::new("abc", Some(42), 24);
        assert_eq!(repetition.element(), &Element::from("abc"));
        assert_eq!(repetition.maximum(), Some(42));
        assert_eq!(repetition.minimum(), 24);

        // inverted bounds are recorded, not rejected
        assert_eq!(Repetition::new("abc", Some(24), 42).minimum(), 42);
    }

    #[test]
    fn it_classifies_optional_repetitions() {
        assert!(Repetition::new("x", Some(1), 0).is_optional());
        assert!(Repetition::optional("x").is_optional());
        assert!(!Repetition::new("x", Some(2), 0).is_optional());
        assert!(!Repetition::new("x", Some(1), 1).is_optional());
        assert!(!Repetition::any("x").is_optional());
    }

    #[test]
    fn it_indexes_into_the_repeated_element() {
        let repetition = Repetition::any(Concatenation::new([",", "abc"]));
        assert_eq!(repetition[0], Element::from(","));
        assert_eq!(repetition[1], Element::from("abc"));
        assert_eq!(repetition.get(2), None);

        // a repeated terminal has no sub-elements
        assert_eq!(Repetition::any("abc").get(0), None);
    }

    #[test]
    #[should_panic]
    fn it_panics_when_indexing_terminals() {
        let _ = &Element::from("abc")[0];
    }

    #[test]
    fn it_treats_terminal_attributes_as_unknown() {
        let mut terminal = Element::from("abc");
        assert!(!terminal.has_getter("items"));

        let error = terminal.get_attribute("items").unwrap_err();
        assert_eq!(error.to_string(), "unknown attribute 'items'");
    }

    #[test]
    fn it_combines_concatenations_into_alternations() {
        let first = Concatenation::new(["a", "b"]);
        let second = Concatenation::new(["c"]);

        let combined = first.clone() | second.clone();
        assert!(!combined.is_ordered());
        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0], Element::from(first.clone()));
        assert_eq!(combined[1], Element::from(second.clone()));

        // operand order is preserved from either side
        let combined = "abc" | second.clone();
        assert_eq!(combined[0], Element::from("abc"));
        assert_eq!(combined[1], Element::from(second.clone()));

        let combined = first.clone() | "abc";
        assert_eq!(combined[0], Element::from(first));
        assert_eq!(combined[1], Element::from("abc"));
    }
}
