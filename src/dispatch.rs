//! Resolution of tree labels to handlers, shared by every traversal strategy.
//!
//! The module is home to the following items:
//! - [`Handlers`], the per-visitor registry mapping labels to handlers, with an optional catch-all
//! - [`Resolved`], the outcome of looking a label up in a registry
//! - [`Traversal`], the trait for *visitors which can be run over a whole tree*, implemented by [`Interpreter`], [`Transformer`] and [`Chain`]
//!
//! Handlers are bound when a visitor is built and looked up by exact label match at dispatch time: there are no wildcards and no label hierarchy. When no handler is registered for a label, the catch-all is used if there is one; otherwise the traversal strategy applies its own built-in fallback.
//!
//! [`Handlers`]: struct.Handlers.html " "
//! [`Resolved`]: enum.Resolved.html " "
//! [`Traversal`]: trait.Traversal.html " "
//! [`Interpreter`]: ../interpreter/struct.Interpreter.html " "
//! [`Transformer`]: ../transformer/struct.Transformer.html " "
//! [`Chain`]: ../transformer/struct.Chain.html " "

use core::fmt::{self, Formatter, Debug};
use std::collections::{hash_map::Entry, HashMap};
use crate::{error::Result, tree::Tree};

/// A label-to-handler registry with an optional catch-all handler of type `D`.
pub struct Handlers<H, D = H> {
    by_label: HashMap<String, H>,
    catch_all: Option<D>,
}
impl<H, D> Handlers<H, D> {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            by_label: HashMap::new(),
            catch_all: None,
        }
    }
    /// Binds a handler to the specified label, returning the handler previously bound to it, if any.
    pub fn insert(&mut self, label: impl Into<String>, handler: H) -> Option<H> {
        match self.by_label.entry(label.into()) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(label = entry.key().as_str(), "replacing an existing handler");
                Some(entry.insert(handler))
            }
            Entry::Vacant(entry) => {
                entry.insert(handler);
                None
            }
        }
    }
    /// Sets the catch-all handler, returning the previous one, if any.
    #[inline]
    pub fn set_catch_all(&mut self, handler: D) -> Option<D> {
        self.catch_all.replace(handler)
    }
    /// Looks up the handler for the specified label.
    pub fn resolve(&self, label: &str) -> Resolved<'_, H, D> {
        let resolved = match (self.by_label.get(label), &self.catch_all) {
            (Some(handler), _) => Resolved::Handler(handler),
            (None, Some(catch_all)) => Resolved::CatchAll(catch_all),
            (None, None) => Resolved::Fallback,
        };
        tracing::trace!(label, resolution = resolved.kind(), "dispatching");
        resolved
    }
    /// Returns `true` if a handler is bound to the specified label, `false` otherwise. The catch-all is not taken into account.
    #[inline]
    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }
    /// Returns `true` if a catch-all handler is set, `false` otherwise.
    #[inline]
    pub fn has_catch_all(&self) -> bool {
        self.catch_all.is_some()
    }
    /// Returns an iterator over the labels which have a handler bound to them, in unspecified order.
    #[inline]
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_label.keys().map(String::as_str)
    }
    /// Returns the number of labels which have a handler bound to them.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_label.len()
    }
    /// Returns `true` if no label has a handler bound to it, `false` otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}
impl<H, D> Default for Handlers<H, D> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
impl<H, D> Debug for Handlers<H, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<_> = self.labels().collect();
        labels.sort_unstable();
        f.debug_struct("Handlers")
            .field("labels", &labels)
            .field("catch_all", &self.has_catch_all())
            .finish()
    }
}

/// The outcome of resolving a label in a [`Handlers`] registry.
///
/// [`Handlers`]: struct.Handlers.html " "
pub enum Resolved<'a, H, D = H> {
    /// A handler is bound to the label.
    Handler(&'a H),
    /// No handler is bound to the label, but the registry has a catch-all.
    CatchAll(&'a D),
    /// Neither is available; the traversal strategy's built-in fallback applies.
    Fallback,
}
impl<H, D> Resolved<'_, H, D> {
    /// Returns `true` if the built-in fallback applies.
    #[inline]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
    fn kind(&self) -> &'static str {
        match self {
            Self::Handler(..) => "handler",
            Self::CatchAll(..) => "catch_all",
            Self::Fallback => "fallback",
        }
    }
}
impl<H, D> Debug for Resolved<'_, H, D> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Visitors which can be run over a whole tree, producing a single output.
///
/// See [`Tree::traverse`] for the other direction of the call.
///
/// [`Tree::traverse`]: ../tree/struct.Tree.html#method.traverse " "
pub trait Traversal<L> {
    /// The final value produced by the traversal.
    type Output;
    /// Runs the traversal over the specified tree, starting at its root.
    fn run(&self, tree: &Tree<L>) -> Result<Self::Output>;
}
impl<L, T: Traversal<L> + ?Sized> Traversal<L> for &T {
    type Output = T::Output;
    #[inline(always)]
    fn run(&self, tree: &Tree<L>) -> Result<Self::Output> {
        (**self).run(tree)
    }
}

impl<L> Tree<L> {
    /// Runs the specified traversal over the tree, starting at its root.
    ///
    /// # Example
    /// ```rust
    /// use kindling::{Tree, Value, Interpreter};
    ///
    /// let tree = Tree::with_leaves("greeting", ["hello".to_owned()]);
    /// let interp = Interpreter::<String, Value>::builder().build();
    /// // No handler for `greeting`, so its children are returned as they are.
    /// assert_eq!(
    ///     tree.traverse(&interp).unwrap(),
    ///     Value::List(vec![Value::Leaf("hello".to_owned())]),
    /// );
    /// ```
    #[inline]
    pub fn traverse<T: Traversal<L>>(&self, traversal: T) -> Result<T::Output> {
        traversal.run(self)
    }
}
