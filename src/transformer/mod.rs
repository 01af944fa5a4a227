//! Bottom-up, eager traversal.
//!
//! A [`Transformer`] visits the children of a node before the node itself: by the time a handler runs, every child has already been transformed, nested trees into whatever their own handlers returned and leaves into [`TreeValue::from_leaf`] of themselves. The handler then receives that sequence of values and returns the value which stands for the node. The tree being transformed is never modified; the result is always freshly built.
//!
//! What happens to labels without a handler or a catch-all is decided by the [`MissingHandlerPolicy`] the transformer is built with. By default, the node is rebuilt with the same label around its transformed children, so that a transformer only has to handle the labels it actually cares about.
//!
//! Transformers whose output describes a tree again can be [chained], the output of one being the input of the next.
//!
//! # Example
//! ```rust
//! use kindling::{Tree, Value, Transformer};
//!
//! // add(sub(i('3'), f('1.1')), i('1'))
//! let tree = Tree::new("add", [
//!     Tree::new("sub", [
//!         Tree::with_leaves("i", ["3".to_owned()]).into(),
//!         Tree::with_leaves("f", ["1.1".to_owned()]).into(),
//!     ])
//!     .into(),
//!     Tree::with_leaves("i", ["1".to_owned()]).into(),
//! ]);
//! let calc = Transformer::<String, Value>::builder()
//!     .inline("i", |s: String| s.parse::<i64>())
//!     .inline("f", |s: String| s.parse::<f64>())
//!     .inline("sub", |a: Value, b: Value| a - b)
//!     .rule("add", |_, args| Ok(args.into_iter().try_fold(Value::Int(0), |a, b| a + b)?))
//!     .build();
//! let result = f64::try_from(calc.transform(&tree).unwrap()).unwrap();
//! assert!((result - 2.9).abs() < 1e-9);
//! ```
//!
//! [`Transformer`]: struct.Transformer.html " "
//! [`TreeValue::from_leaf`]: ../value/trait.TreeValue.html#tymethod.from_leaf " "
//! [`MissingHandlerPolicy`]: enum.MissingHandlerPolicy.html " "
//! [chained]: struct.Transformer.html#method.then " "

use core::{
    convert::TryInto,
    fmt::{self, Formatter, Debug},
};
use crate::{
    adapter::{InlineFn, InlineMethod, InlineRegistrar, Inlined},
    dispatch::{Handlers, Resolved, Traversal},
    error::{Error, Result},
    tree::{Tree, Child},
    value::TreeValue,
};

/// The native handler type of a [`Transformer`]: takes the transformer and the transformed children.
///
/// [`Transformer`]: struct.Transformer.html " "
pub type TransformFn<'h, L, V> = Box<dyn Fn(&Transformer<'h, L, V>, Vec<V>) -> Result<V> + 'h>;
/// The catch-all handler type of a [`Transformer`], which additionally receives the label it was dispatched for.
///
/// [`Transformer`]: struct.Transformer.html " "
pub type DefaultFn<'h, L, V> = Box<dyn Fn(&Transformer<'h, L, V>, &str, Vec<V>) -> Result<V> + 'h>;

/// What a [`Transformer`] does with a label which has neither a handler nor a catch-all.
///
/// [`Transformer`]: struct.Transformer.html " "
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MissingHandlerPolicy {
    /// Rebuild the node around its transformed children with [`TreeValue::from_node`], keeping the label.
    ///
    /// [`TreeValue::from_node`]: ../value/trait.TreeValue.html#tymethod.from_node " "
    #[default]
    Reconstruct,
    /// Abort the traversal with [`Error::MissingHandler`].
    ///
    /// [`Error::MissingHandler`]: ../error/enum.Error.html#variant.MissingHandler " "
    Fail,
}

/// A bottom-up visitor which replaces every node by the value its handler computes from the already transformed children.
///
/// Built with [`Transformer::builder`].
///
/// [`Transformer::builder`]: #method.builder " "
pub struct Transformer<'h, L, V> {
    handlers: Handlers<TransformFn<'h, L, V>, DefaultFn<'h, L, V>>,
    missing: MissingHandlerPolicy,
}
impl<'h, L, V> Transformer<'h, L, V> {
    /// Returns a builder for binding handlers to labels.
    #[inline]
    pub fn builder() -> TransformerBuilder<'h, L, V> {
        TransformerBuilder {
            handlers: Handlers::new(),
            missing: MissingHandlerPolicy::default(),
        }
    }
    /// Returns the handlers bound to the transformer.
    #[inline(always)]
    pub fn handlers(&self) -> &Handlers<TransformFn<'h, L, V>, DefaultFn<'h, L, V>> {
        &self.handlers
    }
    /// Returns the policy applied to labels without a handler.
    #[inline(always)]
    pub const fn missing_handler(&self) -> MissingHandlerPolicy {
        self.missing
    }
    /// Chains another traversal after this one: the output of this transformer is converted back into a tree and fed to `next`.
    ///
    /// # Example
    /// ```rust
    /// use kindling::{Tree, Value, TreeValue, Transformer};
    ///
    /// let tree = Tree::with_leaves("word", ["abc".to_owned()]);
    /// let rename = Transformer::<String, Value>::builder()
    ///     .rule("word", |_, children| Ok(Value::from_node("token".to_owned(), children)))
    ///     .build();
    /// let count = Transformer::<String, Value>::builder()
    ///     .rule("token", |_, children| Ok(Value::Int(children.len() as i64)))
    ///     .build();
    /// assert_eq!(tree.traverse(rename.then(&count)).unwrap(), Value::Int(1));
    /// ```
    #[inline]
    pub const fn then<T>(self, next: T) -> Chain<Self, T> {
        Chain { first: self, second: next }
    }
}
impl<'h, L: Clone, V: TreeValue<L>> Transformer<'h, L, V> {
    /// Transforms the specified tree bottom-up and returns the value computed for its root.
    ///
    /// # Errors
    /// Returns the first error raised by a handler or an inline adapter, or [`Error::MissingHandler`] if the transformer is set to [`MissingHandlerPolicy::Fail`] and a label has no handler. The traversal stops at the first error.
    ///
    /// [`Error::MissingHandler`]: ../error/enum.Error.html#variant.MissingHandler " "
    /// [`MissingHandlerPolicy::Fail`]: enum.MissingHandlerPolicy.html#variant.Fail " "
    pub fn transform(&self, tree: &Tree<L>) -> Result<V> {
        let children = self.transform_children(tree)?;
        let label = tree.label();
        match self.handlers.resolve(label) {
            Resolved::Handler(handler) => handler(self, children),
            Resolved::CatchAll(handler) => handler(self, label, children),
            Resolved::Fallback => match self.missing {
                MissingHandlerPolicy::Reconstruct => {
                    tracing::debug!(label, "rebuilding node without a handler");
                    Ok(V::from_node(label.to_owned(), children))
                }
                MissingHandlerPolicy::Fail => {
                    tracing::debug!(label, "no handler registered");
                    Err(Error::MissingHandler {
                        label: label.to_owned(),
                    })
                }
            },
        }
    }
    /// Transforms the children of the specified node, in order, without dispatching on the node itself.
    ///
    /// # Errors
    /// Stops at the first child whose transformation fails and returns its error.
    pub fn transform_children(&self, tree: &Tree<L>) -> Result<Vec<V>> {
        tree.iter()
            .map(|child| match child {
                Child::Tree(subtree) => self.transform(subtree),
                Child::Leaf(leaf) => Ok(V::from_leaf(leaf.clone())),
            })
            .collect()
    }
    /// Transforms the specified tree and converts the result back into a tree.
    ///
    /// # Errors
    /// In addition to the errors of [`transform`], fails if the result does not describe a tree. With [`Value`], that is [`Error::MalformedNode`].
    ///
    /// [`transform`]: #method.transform " "
    /// [`Value`]: ../value/enum.Value.html " "
    /// [`Error::MalformedNode`]: ../error/enum.Error.html#variant.MalformedNode " "
    pub fn transform_tree(&self, tree: &Tree<L>) -> Result<Tree<L>>
    where
        V: TryInto<Tree<L>>,
        <V as TryInto<Tree<L>>>::Error: Into<Error>,
    {
        self.transform(tree)?.try_into().map_err(|e| {
            let e: Error = e.into();
            tracing::debug!(error = %e, "transformer output is not a tree");
            e
        })
    }
}
impl<'h, L: Clone, V: TreeValue<L>> Traversal<L> for Transformer<'h, L, V> {
    type Output = V;
    #[inline(always)]
    fn run(&self, tree: &Tree<L>) -> Result<V> {
        self.transform(tree)
    }
}
impl<L, V> Debug for Transformer<'_, L, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("handlers", &self.handlers)
            .field("missing", &self.missing)
            .finish()
    }
}

/// Two traversals run one after the other, the output of the first converted back into the tree which the second one runs over.
///
/// Created with [`Transformer::then`] or [`Chain::then`]. Chains are traversals themselves and can be chained further.
///
/// [`Transformer::then`]: struct.Transformer.html#method.then " "
/// [`Chain::then`]: #method.then " "
#[derive(Copy, Clone, Debug)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}
impl<A, B> Chain<A, B> {
    /// Appends another traversal to the chain.
    #[inline]
    pub const fn then<T>(self, next: T) -> Chain<Self, T> {
        Chain { first: self, second: next }
    }
    /// Splits the chain into its two halves.
    #[inline]
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}
impl<L, A, B> Traversal<L> for Chain<A, B>
where
    A: Traversal<L>,
    A::Output: TryInto<Tree<L>>,
    <A::Output as TryInto<Tree<L>>>::Error: Into<Error>,
    B: Traversal<L>,
{
    type Output = B::Output;
    fn run(&self, tree: &Tree<L>) -> Result<Self::Output> {
        let intermediate = self.first.run(tree)?.try_into().map_err(Into::into)?;
        self.second.run(&intermediate)
    }
}

/// Binds handlers to labels for a [`Transformer`].
///
/// Binding a label twice replaces the earlier handler.
///
/// [`Transformer`]: struct.Transformer.html " "
pub struct TransformerBuilder<'h, L, V> {
    handlers: Handlers<TransformFn<'h, L, V>, DefaultFn<'h, L, V>>,
    missing: MissingHandlerPolicy,
}
impl<'h, L: Clone + 'h, V: TreeValue<L> + 'h> TransformerBuilder<'h, L, V> {
    /// Binds a native handler, which receives the transformer and the transformed children of the node.
    pub fn rule<F>(mut self, label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Transformer<'h, L, V>, Vec<V>) -> Result<V> + 'h,
    {
        self.handlers.insert(label, Box::new(handler));
        self
    }
    /// Binds a function which takes the transformed children as positional arguments.
    ///
    /// See the [`adapter`] module for the conversions and arity checks involved.
    ///
    /// [`adapter`]: ../adapter/index.html " "
    pub fn inline<F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        F: InlineFn<V, Args, M> + 'h,
    {
        let label = label.into();
        let name = label.clone();
        self.rule(label, move |_, children| f.call_inline(&name, children))
    }
    /// Binds a function which takes the transformer followed by the transformed children as positional arguments.
    pub fn inline_method<F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        F: InlineMethod<Transformer<'h, L, V>, V, Args, M> + 'h,
    {
        let label = label.into();
        let name = label.clone();
        self.rule(label, move |transformer, children| {
            f.call_inline_method(transformer, &name, children)
        })
    }
    /// Binds a handler used for every label without a handler of its own. It also receives the label it was dispatched for.
    ///
    /// A catch-all takes precedence over the [`MissingHandlerPolicy`].
    ///
    /// [`MissingHandlerPolicy`]: enum.MissingHandlerPolicy.html " "
    pub fn catch_all<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Transformer<'h, L, V>, &str, Vec<V>) -> Result<V> + 'h,
    {
        self.handlers.set_catch_all(Box::new(handler));
        self
    }
    /// Sets what happens to labels without a handler. Defaults to [`MissingHandlerPolicy::Reconstruct`].
    ///
    /// [`MissingHandlerPolicy::Reconstruct`]: enum.MissingHandlerPolicy.html#variant.Reconstruct " "
    #[inline]
    pub fn missing_handler(mut self, policy: MissingHandlerPolicy) -> Self {
        self.missing = policy;
        self
    }
    /// Returns a view of the builder which binds every handler with the inline calling convention.
    #[inline(always)]
    pub const fn inlined(self) -> Inlined<Self> {
        Inlined::new(self)
    }
    /// Finishes binding handlers.
    #[inline]
    pub fn build(self) -> Transformer<'h, L, V> {
        Transformer {
            handlers: self.handlers,
            missing: self.missing,
        }
    }
}
impl<'h, L: Clone + 'h, V: TreeValue<L> + 'h> InlineRegistrar<'h, V> for TransformerBuilder<'h, L, V> {
    type Visitor = Transformer<'h, L, V>;
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
impl<L, V> Debug for TransformerBuilder<'_, L, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerBuilder")
            .field("handlers", &self.handlers)
            .field("missing", &self.missing)
            .finish()
    }
}
