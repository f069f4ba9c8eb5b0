//! Decorations carried by grammar nodes.
//!
//! Every composite element owns a [`Meta`] payload holding its registered
//! *actions* (callables the consuming engine runs when the element matches)
//! and *getters* (named attribute computations). Attributes are lazy: the
//! getter runs on first access and the produced [`Value`] is cached on the
//! node, so later reads return the same value without re-evaluation.
//!
//! # Example
//!
//! ```
//! # use grammar::{Concatenation, Node, Value};
//! let mut assignment = Concatenation::new(["identifier", "=", "expression"])
//!     .with_attribute("target", |node: &Concatenation| {
//!         Value::Element(node[0].clone())
//!     });
//!
//! assert_eq!(
//!     assignment.get_attribute("target").unwrap(),
//!     Value::Element("identifier".into()),
//! );
//! ```

use std::{
    collections::HashMap,
    rc::Rc,
};

use crate::{
    element::Element,
    Error,
};

/// A semantic action attached to a node.
///
/// Actions are recorded in attachment order and carried with the node;
/// running them is the consuming engine's responsibility.
pub type Action<T> = Rc<dyn Fn(&T)>;

/// A named attribute computation, run at most once per node.
pub type Getter<T> = Rc<dyn Fn(&T) -> Value>;

/// The result of an attribute computation.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum Value {
    Integer(i64),
    Text(String),
    Element(Element),
    List(Vec<Value>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Decoration payload owned by every composite element.
///
/// Opaque to callers; it is read and written through the [`Node`] methods of
/// the owning element.
pub struct Meta<T> {
    actions: Vec<Action<T>>,
    getters: HashMap<String, Getter<T>>,
    cache: HashMap<String, Value>,
}

// not derived: the derives would bound `T`, which the `Rc` handles don't need
impl<T> Default for Meta<T> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            getters: HashMap::new(),
            cache: HashMap::new(),
        }
    }
}

impl<T> Clone for Meta<T> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
            getters: self.getters.clone(),
            cache: self.cache.clone(),
        }
    }
}

/// Behavior shared by all composite grammar elements.
///
/// Implementors only provide access to their [`Meta`] payload; action and
/// attribute handling is provided on top of it.
pub trait Node: Sized {
    fn meta(&self) -> &Meta<Self>;

    fn meta_mut(&mut self) -> &mut Meta<Self>;

    /// Appends an action to the node's action list.
    ///
    /// Actions accumulate in attachment order.
    fn add_action<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&Self) + 'static,
    {
        self.meta_mut().actions.push(Rc::new(action));
        self
    }

    /// Builder form of [`add_action`](Node::add_action).
    fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Self) + 'static,
    {
        self.add_action(action);
        self
    }

    /// All attached actions, in attachment order.
    fn actions(&self) -> &[Action<Self>] {
        &self.meta().actions
    }

    /// Registers the computation for the named attribute.
    ///
    /// A second registration under the same name replaces the first. A value
    /// already cached for `name` keeps shadowing the replacement.
    fn add_getter<F>(&mut self, name: impl Into<String>, getter: F) -> &mut Self
    where
        F: Fn(&Self) -> Value + 'static,
    {
        self.meta_mut().getters.insert(name.into(), Rc::new(getter));
        self
    }

    /// Builder form of [`add_getter`](Node::add_getter).
    fn with_attribute<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Self) -> Value + 'static,
    {
        self.add_getter(name, getter);
        self
    }

    /// Whether a getter is registered under `name`.
    fn has_getter(&self, name: &str) -> bool {
        self.meta().getters.contains_key(name)
    }

    /// Returns the value of the named attribute.
    ///
    /// The first access runs the registered getter and caches the value on
    /// the node. Later accesses return the cached value without
    /// re-evaluation, even if the node was mutated in between; a read is a
    /// point-in-time snapshot.
    fn get_attribute(&mut self, name: &str) -> Result<Value, Error> {
        if let Some(value) = self.meta().cache.get(name) {
            tracing::trace!(name, "attribute cache hit");
            return Ok(value.clone());
        }

        let getter = self
            .meta()
            .getters
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownAttribute(name.to_owned()))?;

        tracing::trace!(name, "computing attribute");
        let value = getter(&*self);
        self.meta_mut()
            .cache
            .insert(name.to_owned(), value.clone());

        Ok(value)
    }
}
