//! Calling conventions for handlers.
//!
//! Natively, transformer handlers take the visitor and the whole sequence of transformed children, and interpreter handlers take the visitor and the raw node. The adapters in this module let ordinary functions be used as handlers instead:
//! - [`InlineFn`] — the children are unpacked into positional arguments, so that a parsing function or a binary operator can be bound to a label directly
//! - [`InlineMethod`] — same, but the visitor is passed in front of the unpacked children
//! - [`Inlined`] — applies the inline convention to every handler registered through it, for visitors whose handlers all take unpacked children
//!
//! Adapters only change how arguments are passed when a handler is called. They never change which handler is selected for a label, and arguments are always passed in child order.
//!
//! Each unpacked argument is converted from the traversal's value type with [`TryFrom`], and the function may return either something convertible into the value type or a `Result` of it; conversion failures and errors returned by the function become [`Error::Handler`]. Dispatching an inline handler against a node with a different number of children than the function has parameters fails with [`Error::ArityMismatch`]: children are never dropped and arguments are never padded.
//!
//! # Example
//! ```rust
//! use kindling::{Tree, Child, Value, Transformer};
//!
//! let tree = Tree::new("add", [
//!     Tree::with_leaves("i", ["3".to_owned()]).into(),
//!     Tree::with_leaves("i", ["1".to_owned()]).into(),
//! ]);
//! let calc = Transformer::<String, Value>::builder()
//!     .inlined()
//!     .rule("i", |s: String| s.parse::<i64>())
//!     .rule("add", |a: Value, b: Value| a + b)
//!     .finish()
//!     .build();
//! assert_eq!(calc.transform(&tree).unwrap(), Value::Int(4));
//! ```
//!
//! [`InlineFn`]: trait.InlineFn.html " "
//! [`InlineMethod`]: trait.InlineMethod.html " "
//! [`Inlined`]: struct.Inlined.html " "
//! [`TryFrom`]: https://doc.rust-lang.org/std/convert/trait.TryFrom.html " "
//! [`Error::Handler`]: ../error/enum.Error.html#variant.Handler " "
//! [`Error::ArityMismatch`]: ../error/enum.Error.html#variant.ArityMismatch " "

use core::convert::TryFrom;
use arrayvec::{Array, ArrayVec};
use crate::error::{Error, BoxError, Result};

/// Marker for functions which return a value directly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plain;
/// Marker for functions which return a `Result`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fallible;

/// Return types of functions usable as inline handlers.
///
/// The `M` parameter is either [`Plain`] or [`Fallible`] and only exists to keep the two implementations apart; it is always inferred.
///
/// [`Plain`]: struct.Plain.html " "
/// [`Fallible`]: struct.Fallible.html " "
pub trait IntoHandlerResult<V, M> {
    /// Converts the return value of the function into the result of the handler.
    fn into_handler_result(self) -> core::result::Result<V, BoxError>;
}
impl<V, T: Into<V>> IntoHandlerResult<V, Plain> for T {
    #[inline(always)]
    fn into_handler_result(self) -> core::result::Result<V, BoxError> {
        Ok(self.into())
    }
}
impl<V, T: Into<V>, E: Into<BoxError>> IntoHandlerResult<V, Fallible> for core::result::Result<T, E> {
    #[inline(always)]
    fn into_handler_result(self) -> core::result::Result<V, BoxError> {
        self.map(Into::into).map_err(Into::into)
    }
}

/// Functions which take the children of a node as positional arguments.
///
/// Implemented for every `Fn` taking up to six arguments, each of which can be converted from the value type `V`. `Args` is the tuple of argument types and `M` is the [`IntoHandlerResult`] marker; both are inferred.
///
/// [`IntoHandlerResult`]: trait.IntoHandlerResult.html " "
pub trait InlineFn<V, Args, M> {
    /// The number of children the function takes.
    const ARITY: usize;
    /// Unpacks the children and calls the function with them.
    ///
    /// # Errors
    /// Fails with `ArityMismatch` if the number of children is not `ARITY`, or with `Handler` if converting an argument or the function itself fails.
    fn call_inline(&self, label: &str, children: Vec<V>) -> Result<V>;
}
/// Functions which take the visitor and then the children of a node as positional arguments.
///
/// The method counterpart of [`InlineFn`], with the same conversions and the same arity checks.
///
/// [`InlineFn`]: trait.InlineFn.html " "
pub trait InlineMethod<C: ?Sized, V, Args, M> {
    /// The number of children the function takes, not counting the visitor.
    const ARITY: usize;
    /// Unpacks the children and calls the function with the visitor and them.
    ///
    /// # Errors
    /// Same as [`InlineFn::call_inline`].
    ///
    /// [`InlineFn::call_inline`]: trait.InlineFn.html#tymethod.call_inline " "
    fn call_inline_method(&self, visitor: &C, label: &str, children: Vec<V>) -> Result<V>;
}

fn arity_mismatch(label: &str, expected: usize, found: usize) -> Error {
    tracing::debug!(label, expected, found, "inline handler arity mismatch");
    Error::ArityMismatch {
        label: label.to_owned(),
        expected,
        found,
    }
}
fn unpack<A: Array>(label: &str, children: Vec<A::Item>) -> Result<A> {
    let mut packed = ArrayVec::<A>::new();
    let (expected, found) = (packed.capacity(), children.len());
    if found != expected {
        return Err(arity_mismatch(label, expected, found));
    }
    packed.extend(children);
    packed
        .into_inner()
        .map_err(|packed| arity_mismatch(label, expected, packed.len()))
}
#[inline]
fn convert<V, A>(label: &str, value: V) -> Result<A>
where
    A: TryFrom<V>,
    <A as TryFrom<V>>::Error: Into<BoxError>,
{
    A::try_from(value).map_err(|e| Error::handler(label, e))
}
#[inline]
fn finish<V, M, R: IntoHandlerResult<V, M>>(label: &str, output: R) -> Result<V> {
    output
        .into_handler_result()
        .map_err(|e| Error::handler(label, e))
}

impl<V, F, R, M> InlineFn<V, (), M> for F
where
    F: Fn() -> R,
    R: IntoHandlerResult<V, M>,
{
    const ARITY: usize = 0;
    fn call_inline(&self, label: &str, children: Vec<V>) -> Result<V> {
        if !children.is_empty() {
            return Err(arity_mismatch(label, 0, children.len()));
        }
        finish(label, self())
    }
}
impl<C: ?Sized, V, F, R, M> InlineMethod<C, V, (), M> for F
where
    F: Fn(&C) -> R,
    R: IntoHandlerResult<V, M>,
{
    const ARITY: usize = 0;
    fn call_inline_method(&self, visitor: &C, label: &str, children: Vec<V>) -> Result<V> {
        if !children.is_empty() {
            return Err(arity_mismatch(label, 0, children.len()));
        }
        finish(label, self(visitor))
    }
}

macro_rules! impl_inline {
    ($n:literal: $($arg:ident $val:ident),+) => {
        impl<V, F, R, M, $($arg),+> InlineFn<V, ($($arg,)+), M> for F
        where
            F: Fn($($arg),+) -> R,
            R: IntoHandlerResult<V, M>,
            $(
                $arg: TryFrom<V>,
                <$arg as TryFrom<V>>::Error: Into<BoxError>,
            )+
        {
            const ARITY: usize = $n;
            fn call_inline(&self, label: &str, children: Vec<V>) -> Result<V> {
                let [$($val),+] = unpack::<[V; $n]>(label, children)?;
                $(let $val = convert::<V, $arg>(label, $val)?;)+
                finish(label, self($($val),+))
            }
        }
        impl<C: ?Sized, V, F, R, M, $($arg),+> InlineMethod<C, V, ($($arg,)+), M> for F
        where
            F: Fn(&C, $($arg),+) -> R,
            R: IntoHandlerResult<V, M>,
            $(
                $arg: TryFrom<V>,
                <$arg as TryFrom<V>>::Error: Into<BoxError>,
            )+
        {
            const ARITY: usize = $n;
            fn call_inline_method(&self, visitor: &C, label: &str, children: Vec<V>) -> Result<V> {
                let [$($val),+] = unpack::<[V; $n]>(label, children)?;
                $(let $val = convert::<V, $arg>(label, $val)?;)+
                finish(label, self(visitor, $($val),+))
            }
        }
    };
}
impl_inline!(1: A1 a1);
impl_inline!(2: A1 a1, A2 a2);
impl_inline!(3: A1 a1, A2 a2, A3 a3);
impl_inline!(4: A1 a1, A2 a2, A3 a3, A4 a4);
impl_inline!(5: A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_inline!(6: A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);

/// Visitor builders which can bind inline handlers.
///
/// Implemented by [`InterpreterBuilder`] and [`TransformerBuilder`], and used by [`Inlined`] to apply the inline convention uniformly.
///
/// [`InterpreterBuilder`]: ../interpreter/struct.InterpreterBuilder.html " "
/// [`TransformerBuilder`]: ../transformer/struct.TransformerBuilder.html " "
/// [`Inlined`]: struct.Inlined.html " "
pub trait InlineRegistrar<'h, V>: Sized {
    /// The visitor passed to method-style handlers.
    type Visitor;
    /// Binds a function taking unpacked children to the specified label.
    fn inline<F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        F: InlineFn<V, Args, M> + 'h;
    /// Binds a function taking the visitor and unpacked children to the specified label.
    fn inline_method<F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        F: InlineMethod<Self::Visitor, V, Args, M> + 'h;
}

/// A view of a visitor builder which binds every handler added through it with the inline calling convention.
///
/// Created by the `inlined` method of the builders. Call [`finish`] to get the builder back.
///
/// [`finish`]: #method.finish " "
#[derive(Debug)]
pub struct Inlined<B> {
    builder: B,
}
impl<B> Inlined<B> {
    #[inline(always)]
    pub(crate) const fn new(builder: B) -> Self {
        Self { builder }
    }
    /// Binds a function taking unpacked children to the specified label.
    #[inline]
    pub fn rule<'h, V, F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        B: InlineRegistrar<'h, V>,
        F: InlineFn<V, Args, M> + 'h,
    {
        Self::new(self.builder.inline(label, f))
    }
    /// Binds a function taking the visitor and unpacked children to the specified label.
    #[inline]
    pub fn method<'h, V, F, Args, M>(self, label: impl Into<String>, f: F) -> Self
    where
        B: InlineRegistrar<'h, V>,
        F: InlineMethod<B::Visitor, V, Args, M> + 'h,
    {
        Self::new(self.builder.inline_method(label, f))
    }
    /// Returns the underlying builder.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)]
    pub fn finish(self) -> B {
        self.builder
    }
}
