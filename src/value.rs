//! Values produced by traversals.
//!
//! Traversals are generic over the values their handlers return. The only thing they need from those values is a way to represent what the built-in fallbacks produce, which is what the [`TreeValue`] trait describes. The crate also ships [`Value`], a dynamically typed value which implements it and is convenient for writing evaluators.
//!
//! [`TreeValue`]: trait.TreeValue.html " "
//! [`Value`]: enum.Value.html " "

use core::{
    convert::TryFrom,
    fmt::{self, Formatter, Display},
    ops::{Add, Sub, Mul, Div, Neg},
};
use thiserror::Error;
#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};
use crate::{
    tree::{Tree, Child},
    error::Error as TraversalError,
};

/// Values which can stand in for the results of the built-in traversal fallbacks.
pub trait TreeValue<L>: Sized {
    /// Wraps a leaf, which traversals pass through unchanged.
    fn from_leaf(leaf: L) -> Self;
    /// Wraps the results of visiting the children of a node which has no handler in an interpreter.
    fn from_list(values: Vec<Self>) -> Self;
    /// Rebuilds a node which has no handler in a transformer out of its label and its already transformed children.
    fn from_node(label: String, children: Vec<Self>) -> Self;
}

/// A dynamically typed traversal result.
///
/// Leaves of the original tree are kept as [`Leaf`], and nodes rebuilt by a transformer fallback become [`Tree`] nodes whose leaves are themselves values.
///
/// [`Leaf`]: #variant.Leaf " "
/// [`Tree`]: #variant.Tree " "
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum Value<L = String> {
    /// A leaf of the input tree, passed through unchanged.
    Leaf(L),
    /// A tree rebuilt by a transformer.
    Tree(Tree<Value<L>>),
    /// An ordered sequence of values.
    List(Vec<Value<L>>),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string produced by a handler, as opposed to a leaf.
    Str(String),
    /// A boolean.
    Bool(bool),
    /// The absence of a meaningful value.
    Unit,
}
impl<L> Value<L> {
    /// Returns a short name for the kind of the value, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(..) => "leaf",
            Self::Tree(..) => "tree",
            Self::List(..) => "list",
            Self::Int(..) => "integer",
            Self::Float(..) => "float",
            Self::Str(..) => "string",
            Self::Bool(..) => "boolean",
            Self::Unit => "unit",
        }
    }
    /// Returns the value as a float if it is numeric, promoting integers.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(x) => Some(*x as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }
    /// Converts the value back into a tree of the original leaf type.
    ///
    /// Only [`Tree`] values convert, and only if every child in them is either a nested tree or an untouched [`Leaf`].
    ///
    /// # Errors
    /// Returns [`Error::MalformedNode`] naming the first offending position otherwise.
    ///
    /// [`Tree`]: #variant.Tree " "
    /// [`Leaf`]: #variant.Leaf " "
    /// [`Error::MalformedNode`]: ../error/enum.Error.html#variant.MalformedNode " "
    pub fn into_tree(self) -> Result<Tree<L>, TraversalError> {
        match self {
            Self::Tree(tree) => rebuild(tree),
            other => Err(TraversalError::MalformedNode {
                context: String::from("root"),
                found: other.kind(),
            }),
        }
    }
}
fn rebuild<L>(tree: Tree<Value<L>>) -> Result<Tree<L>, TraversalError> {
    let (label, children) = tree.into_parts();
    let mut rebuilt = Vec::with_capacity(children.len());
    for (index, child) in children.into_iter().enumerate() {
        rebuilt.push(match child {
              Child::Tree(subtree)
            | Child::Leaf(Value::Tree(subtree))
            => Child::Tree(rebuild(subtree)?),
            Child::Leaf(Value::Leaf(leaf)) => Child::Leaf(leaf),
            Child::Leaf(other) => {
                return Err(TraversalError::MalformedNode {
                    context: format!("{}[{}]", label, index),
                    found: other.kind(),
                })
            }
        });
    }
    Ok(Tree::new(label, rebuilt))
}
impl<L> TreeValue<L> for Value<L> {
    #[inline(always)]
    fn from_leaf(leaf: L) -> Self {
        Self::Leaf(leaf)
    }
    #[inline(always)]
    fn from_list(values: Vec<Self>) -> Self {
        Self::List(values)
    }
    fn from_node(label: String, children: Vec<Self>) -> Self {
        Self::Tree(Tree::new(
            label,
            children.into_iter().map(|child| match child {
                Self::Tree(subtree) => Child::Tree(subtree),
                other => Child::Leaf(other),
            }),
        ))
    }
}
impl<L> TryFrom<Value<L>> for Tree<L> {
    type Error = TraversalError;
    #[inline]
    fn try_from(value: Value<L>) -> Result<Self, Self::Error> {
        value.into_tree()
    }
}
impl<L: Display> Display for Value<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(x) => Display::fmt(x, f),
            Self::Tree(x) => Display::fmt(x, f),
            Self::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    Display::fmt(value, f)?;
                }
                f.write_str("]")
            }
            Self::Int(x) => Display::fmt(x, f),
            Self::Float(x) => Display::fmt(x, f),
            Self::Str(x) => Display::fmt(x, f),
            Self::Bool(x) => Display::fmt(x, f),
            Self::Unit => f.write_str("()"),
        }
    }
}

/// The error type for failed operations on a [`Value`].
///
/// [`Value`]: enum.Value.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum ValueError {
    /// The value had a different kind than the operation requires.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// The kind of value which was required.
        expected: &'static str,
        /// The kind of value which was found.
        found: &'static str,
    },
    /// An arithmetic operation on two values of the specified kinds is not defined.
    #[error("cannot apply `{op}` to {lhs} and {rhs}")]
    UnsupportedOperands {
        /// The operator.
        op: &'static str,
        /// The kind of the left operand.
        lhs: &'static str,
        /// The kind of the right operand.
        rhs: &'static str,
    },
    /// Integer arithmetic overflowed.
    #[error("integer overflow in `{0}`")]
    Overflow(&'static str),
    /// Integer division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,
}

macro_rules! impl_from {
    ($($t:ty => $variant:ident),+ $(,)?) => {$(
        impl<L> From<$t> for Value<L> {
            #[inline(always)]
            fn from(x: $t) -> Self {
                Self::$variant(x.into())
            }
        }
    )+};
}
impl_from! {
    i64 => Int,
    i32 => Int,
    u32 => Int,
    f64 => Float,
    f32 => Float,
    bool => Bool,
    String => Str,
    &str => Str,
}
impl<L> From<Vec<Value<L>>> for Value<L> {
    #[inline(always)]
    fn from(values: Vec<Value<L>>) -> Self {
        Self::List(values)
    }
}
impl<L> From<()> for Value<L> {
    #[inline(always)]
    fn from(_: ()) -> Self {
        Self::Unit
    }
}

impl<L> TryFrom<Value<L>> for i64 {
    type Error = ValueError;
    fn try_from(value: Value<L>) -> Result<Self, Self::Error> {
        match value {
            Value::Int(x) => Ok(x),
            other => Err(ValueError::TypeMismatch {
                expected: "integer",
                found: other.kind(),
            }),
        }
    }
}
impl<L> TryFrom<Value<L>> for f64 {
    type Error = ValueError;
    fn try_from(value: Value<L>) -> Result<Self, Self::Error> {
        value.as_f64().ok_or_else(|| ValueError::TypeMismatch {
            expected: "number",
            found: value.kind(),
        })
    }
}
impl<L> TryFrom<Value<L>> for bool {
    type Error = ValueError;
    fn try_from(value: Value<L>) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(x) => Ok(x),
            other => Err(ValueError::TypeMismatch {
                expected: "boolean",
                found: other.kind(),
            }),
        }
    }
}
/// Both strings produced by handlers and leaves convert into `String`.
impl<L: Into<String>> TryFrom<Value<L>> for String {
    type Error = ValueError;
    fn try_from(value: Value<L>) -> Result<Self, Self::Error> {
        match value {
            Value::Str(x) => Ok(x),
            Value::Leaf(x) => Ok(x.into()),
            other => Err(ValueError::TypeMismatch {
                expected: "string",
                found: other.kind(),
            }),
        }
    }
}
impl<L> TryFrom<Value<L>> for Vec<Value<L>> {
    type Error = ValueError;
    fn try_from(value: Value<L>) -> Result<Self, Self::Error> {
        match value {
            Value::List(x) => Ok(x),
            other => Err(ValueError::TypeMismatch {
                expected: "list",
                found: other.kind(),
            }),
        }
    }
}

// Integer operands stay integers with checked arithmetic; any float operand
// promotes the other one.
macro_rules! impl_arith {
    ($trait:ident, $method:ident, $op:literal, $checked:ident, $float:expr) => {
        impl<L> $trait for Value<L> {
            type Output = Result<Value<L>, ValueError>;
            fn $method(self, rhs: Self) -> Self::Output {
                match (&self, &rhs) {
                    (Value::Int(a), Value::Int(b)) => {
                        if $op == "/" && *b == 0 {
                            return Err(ValueError::DivisionByZero);
                        }
                        a.$checked(*b).map(Value::Int).ok_or(ValueError::Overflow($op))
                    }
                    _ => match (self.as_f64(), rhs.as_f64()) {
                        (Some(a), Some(b)) => Ok(Value::Float($float(a, b))),
                        _ => Err(ValueError::UnsupportedOperands {
                            op: $op,
                            lhs: self.kind(),
                            rhs: rhs.kind(),
                        }),
                    },
                }
            }
        }
    };
}
impl_arith!(Add, add, "+", checked_add, |a: f64, b: f64| a + b);
impl_arith!(Sub, sub, "-", checked_sub, |a: f64, b: f64| a - b);
impl_arith!(Mul, mul, "*", checked_mul, |a: f64, b: f64| a * b);
impl_arith!(Div, div, "/", checked_div, |a: f64, b: f64| a / b);
impl<L> Neg for Value<L> {
    type Output = Result<Value<L>, ValueError>;
    fn neg(self) -> Self::Output {
        match self {
            Value::Int(x) => x.checked_neg().map(Value::Int).ok_or(ValueError::Overflow("-")),
            Value::Float(x) => Ok(Value::Float(-x)),
            other => Err(ValueError::TypeMismatch {
                expected: "number",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type V = Value<&'static str>;

    #[test]
    fn arithmetic_promotes_to_float() {
        assert_eq!(V::Int(3) - V::Float(1.1), Ok(V::Float(3.0 - 1.1)));
        assert_eq!(V::Float(1.5) + V::Int(1), Ok(V::Float(2.5)));
        assert_eq!(V::Int(7) * V::Int(6), Ok(V::Int(42)));
        assert_eq!(V::Int(7) / V::Int(2), Ok(V::Int(3)));
        assert_eq!(-V::Int(4), Ok(V::Int(-4)));
    }

    #[test]
    fn arithmetic_errors() {
        assert_eq!(V::Int(1) / V::Int(0), Err(ValueError::DivisionByZero));
        assert_eq!(V::Int(i64::MAX) + V::Int(1), Err(ValueError::Overflow("+")));
        assert_eq!(
            V::Leaf("1") + V::Int(1),
            Err(ValueError::UnsupportedOperands {
                op: "+",
                lhs: "leaf",
                rhs: "integer",
            }),
        );
        assert!((-V::Bool(true)).is_err());
    }

    #[test]
    fn conversions_out() {
        assert_eq!(i64::try_from(V::Int(5)), Ok(5));
        assert_eq!(f64::try_from(V::Int(5)), Ok(5.0));
        assert_eq!(String::try_from(V::Leaf("tok")), Ok(String::from("tok")));
        assert_eq!(String::try_from(V::from("made")), Ok(String::from("made")));
        assert_eq!(
            bool::try_from(V::Unit),
            Err(ValueError::TypeMismatch {
                expected: "boolean",
                found: "unit",
            }),
        );
    }

    #[test]
    fn rebuilt_nodes_convert_back_into_trees() {
        let value = V::from_node(
            "add".to_owned(),
            vec![
                V::from_node("i".to_owned(), vec![V::from_leaf("1")]),
                V::from_leaf("+"),
            ],
        );
        let tree = Tree::<&str>::try_from(value).unwrap();
        assert_eq!(
            tree,
            Tree::new("add", [Tree::with_leaves("i", ["1"]).into(), Child::Leaf("+")]),
        );
    }

    #[test]
    fn derived_values_are_malformed_nodes() {
        let value = V::from_node(
            "add".to_owned(),
            vec![V::from_leaf("1"), V::Int(2)],
        );
        match value.into_tree() {
            Err(TraversalError::MalformedNode { context, found }) => {
                assert_eq!(context, "add[1]");
                assert_eq!(found, "integer");
            }
            other => panic!("expected a malformed node error, got {:?}", other),
        }
        assert!(matches!(
            V::Int(1).into_tree(),
            Err(TraversalError::MalformedNode { found: "integer", .. }),
        ));
    }

    #[test]
    fn display() {
        let list = V::List(vec![V::Leaf("d"), V::Int(1), V::Float(2.5), V::from("s"), V::Unit]);
        assert_eq!(list.to_string(), "[d, 1, 2.5, s, ()]");
    }
}
