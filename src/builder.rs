//! Implicit separator context.
//!
//! Grammar authors often assume something between the elements of every
//! sequence, commas or whitespace usually, without spelling it out at each
//! construction site. A [`Builder`] holds that assumption as explicit
//! state: every concatenation built through it captures a snapshot of the
//! separator in effect at construction time.
//!
//! # Example
//!
//! ```
//! # use grammar::{Builder, Element};
//! let mut builder = Builder::new();
//! builder.implicit_separator(" ");
//!
//! // statement ::= keyword expression ";"
//! let statement = builder.concatenation(["keyword", "expression", ";"]);
//! assert_eq!(statement.separator(), Some(&Element::from(" ")));
//!
//! // the snapshot outlives later changes to the builder
//! builder.clear_separator();
//! assert_eq!(statement.separator(), Some(&Element::from(" ")));
//! ```

use crate::{
    element::{
        Concatenation,
        Element,
    },
    list,
    Error,
};

/// Explicit holder of the implicit separator.
///
/// Concatenations built directly through [`Concatenation::new`] capture no
/// separator; those built through [`Builder::concatenation`] and
/// [`Builder::list`] capture the builder's current one.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    separator: Option<Element>,
}

impl Builder {
    /// Creates a builder with no implicit separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the separator captured by subsequently built concatenations.
    ///
    /// Already-built nodes keep the snapshot they captured.
    pub fn implicit_separator(&mut self, separator: impl Into<Element>) -> &mut Self {
        let separator = separator.into();
        tracing::trace!(?separator, "implicit separator set");
        self.separator = Some(separator);
        self
    }

    /// Removes the separator; subsequently built concatenations capture
    /// none.
    pub fn clear_separator(&mut self) -> &mut Self {
        tracing::trace!("implicit separator cleared");
        self.separator = None;
        self
    }

    /// The separator currently in effect.
    pub fn separator(&self) -> Option<&Element> {
        self.separator.as_ref()
    }

    /// Builds a [`Concatenation`] of `elements` capturing the current
    /// separator.
    pub fn concatenation<I>(&self, elements: I) -> Concatenation
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Concatenation::with_separator(
            elements.into_iter().map(Into::into).collect(),
            self.separator.clone(),
        )
    }

    /// Builds the same expansion as the free-standing `list` function, with
    /// every internal concatenation capturing the current separator.
    pub fn list<I>(&self, items: I, separator: Option<Element>) -> Result<Element, Error>
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        list::expand(
            items.into_iter().map(Into::into).collect(),
            separator,
            self.separator.clone(),
        )
    }
}
