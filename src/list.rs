//! Separator-delimited list expansion.
//!
//! [`list`] is shorthand for the common "item, item, item" pattern. It
//! expands one or more item patterns plus an optional separator into the
//! primitive tree and, when a separator is given, attaches an iteration
//! attribute that yields the matched item values with the separators
//! flattened away.

use crate::{
    element::{
        Alternation,
        Concatenation,
        Element,
        Repetition,
    },
    node::{
        Node,
        Value,
    },
    Error,
};

/// Name of the iteration attribute attached to separator-delimited lists.
pub const ITEMS: &str = "items";

/// Expands `items` plus an optional `separator` into a primitive pattern.
///
/// With no separator the pattern is simply zero or more repetitions of the
/// item. With a separator it becomes "first item, then zero or more
/// (separator, item) pairs", carrying an [`ITEMS`] getter that yields the
/// matched item values in order. More than one item pattern is wrapped in
/// an unordered [`Alternation`] first.
///
/// The produced tree is structurally equal to composing the primitives by
/// hand. Concatenations built here capture no implicit separator; use
/// [`Builder::list`](crate::Builder::list) for that.
///
/// # Example
///
/// ```
/// # use grammar::{list, Concatenation, Element, Repeatable, ITEMS};
/// let arguments = list(["expression"], Some(Element::from(","))).unwrap();
///
/// assert!(arguments.has_getter(ITEMS));
/// assert_eq!(
///     arguments,
///     Element::from(Concatenation::new([
///         Element::from("expression"),
///         Concatenation::new([",", "expression"]).any().into(),
///     ])),
/// );
/// ```
pub fn list<I>(items: I, separator: Option<Element>) -> Result<Element, Error>
where
    I: IntoIterator,
    I::Item: Into<Element>,
{
    expand(items.into_iter().map(Into::into).collect(), separator, None)
}

pub(crate) fn expand(
    mut items: Vec<Element>,
    separator: Option<Element>,
    implicit: Option<Element>,
) -> Result<Element, Error> {
    let item = match items.len() {
        0 => return Err(Error::EmptyList),
        1 => items.remove(0),
        _ => Alternation::new(items).into(),
    };

    tracing::debug!(?separator, "expanding list pattern");

    let element = match separator {
        None => Repetition::any(item).into(),
        Some(separator) => {
            let pair =
                Concatenation::with_separator(vec![separator, item.clone()], implicit.clone());
            let mut node = Concatenation::with_separator(
                vec![item, Repetition::any(pair).into()],
                implicit,
            );
            node.add_getter(ITEMS, collect_items);
            node.into()
        }
    };

    Ok(element)
}

/// Yields the item values of a list tree in match order.
///
/// The first child is the first item. The second child is the matched
/// (separator, item) pairs: each pair contributes its last element. A child
/// that is still a repetition is the unmatched pattern and contributes
/// nothing.
fn collect_items(node: &Concatenation) -> Value {
    let mut values = Vec::new();

    let mut children = node.elements().iter();
    if let Some(first) = children.next() {
        values.push(item_value(first));
    }

    for child in children {
        match child {
            Element::Repetition(_) => {}
            Element::Concatenation(pairs) => {
                for pair in pairs.elements() {
                    values.extend(pair_item_value(pair));
                }
            }
            other => values.push(item_value(other)),
        }
    }

    Value::List(values)
}

fn pair_item_value(pair: &Element) -> Option<Value> {
    match pair {
        Element::Concatenation(pair) => pair.elements().last().map(item_value),
        other => Some(item_value(other)),
    }
}

/// The value of one matched item.
///
/// An alternation yields its own elements, the structure that was actually
/// matched, rather than the choice wrapper.
fn item_value(element: &Element) -> Value {
    match element {
        Element::Alternation(alternation) => Value::List(
            alternation
                .elements()
                .iter()
                .cloned()
                .map(Value::Element)
                .collect(),
        ),
        other => Value::Element(other.clone()),
    }
}
