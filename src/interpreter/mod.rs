//! Top-down, lazy traversal.
//!
//! An [`Interpreter`] dispatches on the label of the root node and hands the *raw node* to the handler. Descending into the children is up to the handler, which calls [`visit_children`] (or [`visit`] on selected children) only when and where it wants to. This makes it possible to implement constructs which must not evaluate all of their operands, such as short-circuiting boolean operators or conditionals.
//!
//! Labels without a handler are transparent: the interpreter descends into them on its own and returns the visited children, with leaves passed through unchanged, as a single list value.
//!
//! # Example
//! ```rust
//! use kindling::{Tree, Child, Value, Interpreter};
//!
//! // a(b(), c(), 'd')
//! let tree = Tree::new("a", [
//!     Tree::leaf_node("b").into(),
//!     Tree::leaf_node("c").into(),
//!     Child::leaf("d".to_owned()),
//! ]);
//! let interp = Interpreter::<String, Value>::builder()
//!     .rule("b", |_, _| Ok("B".into()))
//!     .rule("c", |_, _| Ok("C".into()))
//!     .build();
//! assert_eq!(
//!     interp.visit(&tree).unwrap(),
//!     Value::List(vec!["B".into(), "C".into(), Value::Leaf("d".to_owned())]),
//! );
//! ```
//!
//! [`Interpreter`]: struct.Interpreter.html " "
//! [`visit_children`]: struct.Interpreter.html#method.visit_children " "
//! [`visit`]: struct.Interpreter.html#method.visit " "

use core::fmt::{self, Formatter, Debug};
use crate::{
    adapter::{InlineFn, InlineMethod, InlineRegistrar, Inlined},
    dispatch::{Handlers, Resolved, Traversal},
    error::Result,
    tree::{Tree, Child},
    value::TreeValue,
};

/// The native handler type of an [`Interpreter`]: takes the interpreter and the raw node.
///
/// [`Interpreter`]: struct.Interpreter.html " "
pub type VisitFn<'h, L, V> = Box<dyn Fn(&Interpreter<'h, L, V>, &Tree<L>) -> Result<V> + 'h>;

/// A top-down visitor whose handlers decide themselves whether to descend into children.
///
/// Built with [`Interpreter::builder`]. The interpreter only reads the trees it visits.
///
/// [`Interpreter::builder`]: #method.builder " "
pub struct Interpreter<'h, L, V> {
    handlers: Handlers<VisitFn<'h, L, V>>,
}
impl<'h, L, V> Interpreter<'h, L, V> {
    /// Returns a builder for binding handlers to labels.
    #[inline]
    pub fn builder() -> InterpreterBuilder<'h, L, V> {
        InterpreterBuilder {
            handlers: Handlers::new(),
        }
    }
    /// Returns the handlers bound to the interpreter.
    #[inline(always)]
    pub fn handlers(&self) -> &Handlers<VisitFn<'h, L, V>> {
        &self.handlers
    }
}
impl<'h, L: Clone, V: TreeValue<L>> Interpreter<'h, L, V> {
    /// Dispatches on the label of the specified node.
    ///
    /// The handler bound to the label receives the node itself. Without a handler or a catch-all, the node is descended into as if by [`visit_children`] and the results are returned as a list value.
    ///
    /// # Errors
    /// Whatever error a handler produces is returned as is, aborting the traversal.
    ///
    /// [`visit_children`]: #method.visit_children " "
    pub fn visit(&self, tree: &Tree<L>) -> Result<V> {
        match self.handlers.resolve(tree.label()) {
            Resolved::Handler(handler) | Resolved::CatchAll(handler) => handler(self, tree),
            Resolved::Fallback => {
                tracing::debug!(label = tree.label(), "descending into node without a handler");
                self.visit_children(tree).map(V::from_list)
            }
        }
    }
    /// Visits every child of the specified node in order: nested trees are dispatched on with [`visit`], leaves are passed through unchanged.
    ///
    /// The returned sequence has the same length and order as the children.
    ///
    /// # Errors
    /// Stops at the first child whose visit fails and returns its error.
    ///
    /// [`visit`]: #method.visit " "
    pub fn visit_children(&self, tree: &Tree<L>) -> Result<Vec<V>> {
        tree.iter()
            .map(|child| match child {
                Child::Tree(subtree) => self.visit(subtree),
                Child::Leaf(leaf) => Ok(V::from_leaf(leaf.clone())),
            })
            .collect()
    }
}
impl<'h, L: Clone, V: TreeValue<L>> Traversal<L> for Interpreter<'h, L, V> {
    type Output = V;
    #[inline(always)]
    fn run(&self, tree: &Tree<L>) -> Result<V> {
        self.visit(tree)
    }
}
impl<L, V> Debug for Interpreter<'_, L, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("handlers", &self.handlers)
            .finish()
    }
}

/// Binds handlers to labels for an [`Interpreter`].
///
/// Binding a label twice replaces the earlier handler.
///
/// [`Interpreter`]: struct.Interpreter.html " "
pub struct InterpreterBuilder<'h, L, V> {
    handlers: Handlers<VisitFn<'h, L, V>>,
}
impl<'h, L: Clone + 'h, V: TreeValue<L> + 'h> InterpreterBuilder<'h, L, V> {
    /// Binds a native handler, which receives the interpreter and the raw node.
    pub fn rule<F>(mut self, label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Interpreter<'h, L, V>, &Tree<L>) -> Result<V> + 'h,
    {
        self.handlers.insert(label, Box::new(handler));
        self
    }
    /// Binds a handler which receives the already visited children instead of the raw node.
    ///
    /// The children are visited exactly as by [`Interpreter::visit_children`] before the handler is called.
    ///
    /// [`Interpreter::visit_children`]: struct.Interpreter.html#method.visit_children " "
    pub fn visited<F>(self, label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Interpreter<'h, L, V>, Vec<V>) -> Result<V> + 'h,
    {
        self.rule(label, move |interp, tree| {
            let values = interp.visit_children(tree)?;
            handler(interp, values)
        })
    }
    /// Binds a function which takes the visited children as positional arguments.
    ///
    /// The children are visited before the function is called, so an inline handler cannot skip any of them. See the [`adapter`] module for the conversions and arity checks involved.
    ///
    /// [`adapter`]: ../adapter/index.html " "
    pub fn inline<F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        F: InlineFn<V, Args, M> + 'h,
    {
        let label = label.into();
        let name = label.clone();
        self.rule(label, move |interp, tree| {
            f.call_inline(&name, interp.visit_children(tree)?)
        })
    }
    /// Binds a function which takes the interpreter followed by the visited children as positional arguments.
    pub fn inline_method<F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        F: InlineMethod<Interpreter<'h, L, V>, V, Args, M> + 'h,
    {
        let label = label.into();
        let name = label.clone();
        self.rule(label, move |interp, tree| {
            f.call_inline_method(interp, &name, interp.visit_children(tree)?)
        })
    }
    /// Binds a handler which is used for every label without a handler of its own, instead of descending transparently.
    pub fn catch_all<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Interpreter<'h, L, V>, &Tree<L>) -> Result<V> + 'h,
    {
        self.handlers.set_catch_all(Box::new(handler));
        self
    }
    /// Returns a view of the builder which binds every handler with the inline calling convention.
    #[inline(always)]
    pub const fn inlined(self) -> Inlined<Self> {
        Inlined::new(self)
    }
    /// Finishes binding handlers.
    #[inline]
    pub fn build(self) -> Interpreter<'h, L, V> {
        Interpreter {
            handlers: self.handlers,
        }
    }
}
impl<'h, L: Clone + 'h, V: TreeValue<L> + 'h> InlineRegistrar<'h, V> for InterpreterBuilder<'h, L, V> {
    type Visitor = Interpreter<'h, L, V>;
    #[inline(always)]
    fn inline<F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        F: InlineFn<V, Args, M> + 'h,
    {
        Self::inline(self, label, f)
    }
    #[inline(always)]
    fn inline_method<F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        F: InlineMethod<Self::Visitor, V, Args, M> + 'h,
    {
        Self::inline_method(self, label, f)
    }
}
impl<L, V> Debug for InterpreterBuilder<'_, L, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpreterBuilder")
            .field("handlers", &self.handlers)
            .finish()
    }
}

#[cfg(test)]
mod tests;
