//! The error type shared by every traversal in the crate.

use thiserror::Error;
use crate::value::ValueError;

/// Boxed error produced by a user-supplied handler function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A result type defaulting to the crate's [`Error`].
///
/// [`Error`]: enum.Error.html " "
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The error type returned by [`Interpreter::visit`], [`Transformer::transform`] and everything built on top of them.
///
/// Errors are never retried or swallowed by the traversals: the first one raised anywhere in the tree aborts the whole traversal and is handed back to the caller, with no partial result.
///
/// [`Interpreter::visit`]: ../interpreter/struct.Interpreter.html#method.visit " "
/// [`Transformer::transform`]: ../transformer/struct.Transformer.html#method.transform " "
#[derive(Debug, Error)]
pub enum Error {
    /// A transformer configured with [`MissingHandlerPolicy::Fail`] reached a label which has neither a handler nor a catch-all.
    ///
    /// [`MissingHandlerPolicy::Fail`]: ../transformer/enum.MissingHandlerPolicy.html#variant.Fail " "
    #[error("no handler registered for label `{label}`")]
    MissingHandler {
        /// The label which could not be dispatched.
        label: String,
    },
    /// An inline handler was dispatched against a node whose number of children differs from the number of parameters the handler takes.
    #[error("handler for `{label}` takes {expected} argument(s), but the node has {found} child(ren)")]
    ArityMismatch {
        /// The label the handler is registered for.
        label: String,
        /// The number of parameters of the wrapped function.
        expected: usize,
        /// The number of children the node actually had.
        found: usize,
    },
    /// A value which was expected to describe a tree contained something which is neither a tree nor a leaf.
    #[error("malformed node at {context}: expected a tree or a leaf, found {found}")]
    MalformedNode {
        /// Where in the tree the offending value was found, as a `label[index]` path.
        context: String,
        /// The kind of value which was found instead.
        found: &'static str,
    },
    /// A built-in [`Value`] operation failed.
    ///
    /// [`Value`]: ../value/enum.Value.html " "
    #[error(transparent)]
    Value(#[from] ValueError),
    /// A function wrapped by the calling-convention adapter returned an error.
    #[error("handler for `{label}` failed: {source}")]
    Handler {
        /// The label the handler is registered for.
        label: String,
        /// The error returned by the function.
        #[source]
        source: BoxError,
    },
}
impl Error {
    /// Wraps an arbitrary error returned by the handler for `label`.
    #[inline]
    pub fn handler(label: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Handler {
            label: label.into(),
            source: source.into(),
        }
    }
    /// Returns the label the error is attributed to, if there is one.
    pub fn label(&self) -> Option<&str> {
        match self {
              Self::MissingHandler { label }
            | Self::ArityMismatch { label, .. }
            | Self::Handler { label, .. }
            => Some(label.as_str()),
            Self::MalformedNode { .. } | Self::Value(..) => None,
        }
    }
}
