//! Labeled trees, the input of every traversal in the crate.
//!
//! A [`Tree`] is a label plus an ordered list of [`Child`]ren, each of which is either another tree or an opaque leaf payload supplied by the parser which built the tree. Trees have value semantics: equality is structural and recursive, `Clone` is a deep copy and, with the `serde` feature enabled, serialization preserves both structure and leaves exactly.
//!
//! # Example
//! ```rust
//! use kindling::{Tree, Child};
//!
//! // a(b, c, 'd')
//! let tree = Tree::new("a", [
//!     Tree::leaf_node("b").into(),
//!     Tree::leaf_node("c").into(),
//!     Child::leaf("d".to_owned()),
//! ]);
//! assert_eq!(tree.label(), "a");
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.to_string(), "a(b(), c(), d)");
//!
//! // Deep copies compare equal to the original.
//! assert_eq!(tree.clone(), tree);
//! ```
//!
//! [`Tree`]: struct.Tree.html " "
//! [`Child`]: enum.Child.html " "

mod iter;
pub use iter::{Subtrees, SubtreesTopDown, Leaves};

use core::{
    fmt::{self, Formatter, Display, Write},
    slice,
};
#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// A labeled node with an ordered list of children.
///
/// The traversals never mutate a tree: interpreters only read it and transformers always build new values. No mutating accessors are exposed; use [`into_parts`] to take a tree apart by value.
///
/// [`into_parts`]: #method.into_parts " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tree<L = String> {
    label: String,
    children: Vec<Child<L>>,
}
/// A child of a [`Tree`]: either a nested tree or a leaf payload.
///
/// [`Tree`]: struct.Tree.html " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum Child<L = String> {
    /// A nested tree.
    Tree(Tree<L>),
    /// An opaque leaf payload, such as the text of a token.
    Leaf(L),
}

impl<L> Tree<L> {
    /// Creates a tree with the specified label and children.
    #[inline]
    pub fn new(label: impl Into<String>, children: impl IntoIterator<Item = Child<L>>) -> Self {
        Self {
            label: label.into(),
            children: children.into_iter().collect(),
        }
    }
    /// Creates a tree without children.
    #[inline]
    pub fn leaf_node(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }
    /// Creates a tree whose children are all leaves.
    ///
    /// # Example
    /// ```rust
    /// # use kindling::{Tree, Child};
    /// let tree = Tree::with_leaves("i", ["3"]);
    /// assert_eq!(tree.children(), &[Child::Leaf("3")]);
    /// ```
    #[inline]
    pub fn with_leaves(label: impl Into<String>, leaves: impl IntoIterator<Item = L>) -> Self {
        Self::new(label, leaves.into_iter().map(Child::Leaf))
    }

    /// Returns the label of the tree, i.e. the name of the grammar rule which produced it.
    #[inline(always)]
    pub fn label(&self) -> &str {
        &self.label
    }
    /// Returns the children of the tree, in order.
    #[inline(always)]
    pub fn children(&self) -> &[Child<L>] {
        &self.children
    }
    /// Returns an iterator over the children of the tree, in order.
    #[inline(always)]
    pub fn iter(&self) -> slice::Iter<'_, Child<L>> {
        self.children.iter()
    }
    /// Returns the number of children, not counting deeper descendants.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.children.len()
    }
    /// Returns `true` if the tree has no children, `false` otherwise.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
    /// Consumes the tree, returning its label and children.
    #[inline]
    pub fn into_parts(self) -> (String, Vec<Child<L>>) {
        (self.label, self.children)
    }

    /// Returns an iterator over every subtree, including the tree itself, in post-order: children come before their parents, siblings left to right.
    #[inline]
    pub fn iter_subtrees(&self) -> Subtrees<'_, L> {
        Subtrees::new(self)
    }
    /// Returns an iterator over every subtree, including the tree itself, in pre-order: parents come before their children, siblings left to right.
    #[inline]
    pub fn iter_subtrees_topdown(&self) -> SubtreesTopDown<'_, L> {
        SubtreesTopDown::new(self)
    }
    /// Returns an iterator over every leaf in the tree, depth-first, left to right.
    #[inline]
    pub fn leaves(&self) -> Leaves<'_, L> {
        Leaves::new(self)
    }
    /// Returns the subtrees for which the predicate holds, in post-order.
    pub fn find_pred<'a, P>(&'a self, mut pred: P) -> impl Iterator<Item = &'a Tree<L>> + 'a
    where
        P: FnMut(&Tree<L>) -> bool + 'a,
    {
        self.iter_subtrees().filter(move |subtree| pred(subtree))
    }
    /// Returns the subtrees with the specified label, in post-order.
    ///
    /// # Example
    /// ```rust
    /// # use kindling::Tree;
    /// let tree = Tree::new("expr", [
    ///     Tree::with_leaves("num", ["1"]).into(),
    ///     Tree::new("neg", [Tree::with_leaves("num", ["2"]).into()]).into(),
    /// ]);
    /// let nums: Vec<_> = tree
    ///     .find_label("num")
    ///     .map(|t| t.children()[0].as_leaf().copied())
    ///     .collect();
    /// assert_eq!(nums, [Some("1"), Some("2")]);
    /// ```
    pub fn find_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Tree<L>> + 'a {
        self.find_pred(move |subtree| subtree.label == label)
    }
    /// Returns the leaves for which the predicate holds, depth-first, left to right.
    pub fn scan_values<'a, P>(&'a self, mut pred: P) -> impl Iterator<Item = &'a L> + 'a
    where
        P: FnMut(&L) -> bool + 'a,
    {
        self.leaves().filter(move |leaf| pred(leaf))
    }
    /// Builds a tree of the same shape with every leaf mapped through the specified function, visiting leaves depth-first, left to right.
    pub fn map_leaves<M>(&self, mut f: impl FnMut(&L) -> M) -> Tree<M> {
        self.map_leaves_with(&mut f)
    }
    fn map_leaves_with<M>(&self, f: &mut dyn FnMut(&L) -> M) -> Tree<M> {
        Tree {
            label: self.label.clone(),
            children: self
                .children
                .iter()
                .map(|child| match child {
                    Child::Tree(subtree) => Child::Tree(subtree.map_leaves_with(f)),
                    Child::Leaf(leaf) => Child::Leaf(f(leaf)),
                })
                .collect(),
        }
    }
}
impl<L: Display> Tree<L> {
    /// Renders the tree on multiple lines, indenting every level by two spaces.
    ///
    /// A node whose only child is a leaf is printed on one line, with the leaf separated from the label by a tab.
    ///
    /// # Example
    /// ```rust
    /// # use kindling::Tree;
    /// let tree = Tree::new("add", [
    ///     Tree::with_leaves("i", ["1"]).into(),
    ///     Tree::with_leaves("i", ["2"]).into(),
    /// ]);
    /// assert_eq!(tree.pretty(), "add\n  i\t1\n  i\t2\n");
    /// ```
    #[inline]
    pub fn pretty(&self) -> String {
        self.pretty_with("  ")
    }
    /// Same as [`pretty`], but with a custom indentation string.
    ///
    /// [`pretty`]: #method.pretty " "
    pub fn pretty_with(&self, indent: &str) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, indent, 0)
            .expect("writing to a String cannot fail");
        out
    }
    fn write_pretty(&self, out: &mut String, indent: &str, level: usize) -> fmt::Result {
        for _ in 0..level {
            out.push_str(indent);
        }
        if let [Child::Leaf(leaf)] = self.children.as_slice() {
            return writeln!(out, "{}\t{}", self.label, leaf);
        }
        writeln!(out, "{}", self.label)?;
        for child in &self.children {
            match child {
                Child::Tree(subtree) => subtree.write_pretty(out, indent, level + 1)?,
                Child::Leaf(leaf) => {
                    for _ in 0..=level {
                        out.push_str(indent);
                    }
                    writeln!(out, "{}", leaf)?;
                }
            }
        }
        Ok(())
    }
}
impl<L: Display> Display for Tree<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)?;
        f.write_char('(')?;
        for (i, child) in self.children.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            Display::fmt(child, f)?;
        }
        f.write_char(')')
    }
}
impl<'a, L> IntoIterator for &'a Tree<L> {
    type Item = &'a Child<L>;
    type IntoIter = slice::Iter<'a, Child<L>>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<L> Child<L> {
    /// Creates a leaf child.
    #[inline(always)]
    pub const fn leaf(payload: L) -> Self {
        Self::Leaf(payload)
    }
    /// Returns `true` if the child is a nested tree, `false` otherwise.
    #[inline(always)]
    pub const fn is_tree(&self) -> bool {
        matches!(self, Self::Tree(..))
    }
    /// Returns `true` if the child is a leaf, `false` otherwise.
    #[inline(always)]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(..))
    }
    /// Returns the nested tree, or `None` if the child is a leaf.
    #[inline]
    pub const fn as_tree(&self) -> Option<&Tree<L>> {
        match self {
            Self::Tree(x) => Some(x),
            Self::Leaf(..) => None,
        }
    }
    /// Returns the leaf payload, or `None` if the child is a nested tree.
    #[inline]
    pub const fn as_leaf(&self) -> Option<&L> {
        match self {
            Self::Leaf(x) => Some(x),
            Self::Tree(..) => None,
        }
    }
}
impl<L> From<Tree<L>> for Child<L> {
    #[inline(always)]
    fn from(tree: Tree<L>) -> Self {
        Self::Tree(tree)
    }
}
impl<L: Display> Display for Child<L> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(x) => Display::fmt(x, f),
            Self::Leaf(x) => Display::fmt(x, f),
        }
    }
}

#[cfg(test)]
mod tests;
