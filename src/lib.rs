//! Composable grammar element trees for recursive-descent parsing.
//!
//! This crate builds and annotates the structural description of a grammar,
//! handed as a read-only tree to a separate parser engine; it does not
//! parse text itself. Patterns compose bottom-up from terminals into
//! [`Alternation`] (one-of-N choice), [`Concatenation`] (all-of-N sequence)
//! and [`Repetition`] (inclusive repeat-count range) nodes. Nodes carry
//! semantic [actions](Node::add_action) and lazily computed, cached
//! [attributes](Node::get_attribute) for the consuming engine.
//!
//! # Example
//!
//! ```
//! use grammar::{
//!     list,
//!     Concatenation,
//!     Node,
//!     Repetition,
//!     Value,
//!     ITEMS,
//! };
//!
//! // arguments ::= expression ("," expression)*
//! let arguments = list(["expression"], Some(",".into()))?;
//! assert!(arguments.has_getter(ITEMS));
//!
//! // call ::= identifier "(" arguments? ")"
//! let mut call = Concatenation::new(["identifier", "("]);
//! call.append(Repetition::optional(arguments));
//! call.append(")");
//!
//! assert_eq!(
//!     call.to_string(),
//!     r#"("identifier" "(" ("expression" ("," "expression")*)? ")")"#,
//! );
//!
//! // a derived attribute, computed on first access and cached on the node
//! let mut call = call.with_attribute("callee", |call: &Concatenation| {
//!     Value::Element(call[0].clone())
//! });
//! assert_eq!(call.get_attribute("callee")?, Value::Element("identifier".into()));
//! # Ok::<(), grammar::Error>(())
//! ```

pub mod builder;
mod display;
pub mod element;
pub mod list;
pub mod node;

pub use crate::{
    builder::Builder,
    element::{
        Alternation,
        Concatenation,
        Element,
        Repeatable,
        Repetition,
    },
    list::{
        list,
        ITEMS,
    },
    node::{
        Action,
        Getter,
        Node,
        Value,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An attribute was requested that has neither a cached value nor a
    /// registered getter.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// The list combinator was given no item patterns.
    #[error("list requires at least one item pattern")]
    EmptyList,
}
