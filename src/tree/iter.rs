use core::{iter::FusedIterator, slice};
use super::{Tree, Child};

/// Iterator over the subtrees of a tree in post-order, created by [`Tree::iter_subtrees`].
///
/// [`Tree::iter_subtrees`]: struct.Tree.html#method.iter_subtrees " "
#[derive(Clone, Debug)]
pub struct Subtrees<'a, L> {
    // Each entry is a tree and the index of the next child to look at.
    stack: Vec<(&'a Tree<L>, usize)>,
}
impl<'a, L> Subtrees<'a, L> {
    pub(super) fn new(root: &'a Tree<L>) -> Self {
        Self {
            stack: vec![(root, 0)],
        }
    }
}
impl<'a, L> Iterator for Subtrees<'a, L> {
    type Item = &'a Tree<L>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let tree = top.0;
            match tree.children.get(top.1) {
                Some(child) => {
                    top.1 += 1;
                    if let Child::Tree(subtree) = child {
                        self.stack.push((subtree, 0));
                    }
                }
                None => {
                    self.stack.pop();
                    return Some(tree);
                }
            }
        }
    }
}
impl<L> FusedIterator for Subtrees<'_, L> {}

/// Iterator over the subtrees of a tree in pre-order, created by [`Tree::iter_subtrees_topdown`].
///
/// [`Tree::iter_subtrees_topdown`]: struct.Tree.html#method.iter_subtrees_topdown " "
#[derive(Clone, Debug)]
pub struct SubtreesTopDown<'a, L> {
    stack: Vec<&'a Tree<L>>,
}
impl<'a, L> SubtreesTopDown<'a, L> {
    pub(super) fn new(root: &'a Tree<L>) -> Self {
        Self { stack: vec![root] }
    }
}
impl<'a, L> Iterator for SubtreesTopDown<'a, L> {
    type Item = &'a Tree<L>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        // Reversed so that the leftmost child is popped first
        self.stack
            .extend(tree.children.iter().rev().filter_map(Child::as_tree));
        Some(tree)
    }
}
impl<L> FusedIterator for SubtreesTopDown<'_, L> {}

/// Iterator over the leaves of a tree, depth-first and left to right, created by [`Tree::leaves`].
///
/// [`Tree::leaves`]: struct.Tree.html#method.leaves " "
#[derive(Clone, Debug)]
pub struct Leaves<'a, L> {
    stack: Vec<slice::Iter<'a, Child<L>>>,
}
impl<'a, L> Leaves<'a, L> {
    pub(super) fn new(root: &'a Tree<L>) -> Self {
        Self {
            stack: vec![root.children.iter()],
        }
    }
}
impl<'a, L> Iterator for Leaves<'a, L> {
    type Item = &'a L;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.last_mut()?.next() {
                Some(Child::Leaf(leaf)) => return Some(leaf),
                Some(Child::Tree(subtree)) => self.stack.push(subtree.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
impl<L> FusedIterator for Leaves<'_, L> {}
