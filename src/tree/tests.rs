use super::*;
use pretty_assertions::assert_eq;

fn sample() -> Tree<&'static str> {
    // a(b(x), c(y), d(z))
    Tree::new("a", [
        Tree::with_leaves("b", ["x"]).into(),
        Tree::with_leaves("c", ["y"]).into(),
        Tree::with_leaves("d", ["z"]).into(),
    ])
}

fn nested() -> Tree<&'static str> {
    // root(left(l1, inner(l2)), l3, right())
    Tree::new("root", [
        Tree::new("left", [
            Child::Leaf("l1"),
            Tree::with_leaves("inner", ["l2"]).into(),
        ])
        .into(),
        Child::Leaf("l3"),
        Tree::leaf_node("right").into(),
    ])
}

#[test]
fn deep_copy() {
    let tree = sample();
    assert_eq!(tree.clone(), tree);
}

#[test]
fn equality_is_structural() {
    assert_eq!(sample(), sample());
    assert_ne!(sample(), Tree::with_leaves("a", ["x", "y", "z"]));
    // Child order is significant
    let swapped = Tree::new("a", [
        Tree::with_leaves("c", ["y"]).into(),
        Tree::with_leaves("b", ["x"]).into(),
        Tree::with_leaves("d", ["z"]).into(),
    ]);
    assert_ne!(sample(), swapped);
    // Leaves are compared by their own equality
    assert_ne!(
        Tree::with_leaves("i", ["3"]),
        Tree::with_leaves("i", ["4"]),
    );
}

#[test]
fn accessors() {
    let tree = nested();
    assert_eq!(tree.label(), "root");
    assert_eq!(tree.len(), 3);
    assert!(!tree.is_empty());
    assert!(tree.children()[0].is_tree());
    assert_eq!(tree.children()[1].as_leaf(), Some(&"l3"));
    assert_eq!(tree.children()[1].as_tree(), None);
    assert!(tree.children()[2].as_tree().map_or(false, Tree::is_empty));
    let labels: Vec<_> = tree
        .iter()
        .filter_map(Child::as_tree)
        .map(Tree::label)
        .collect();
    assert_eq!(labels, ["left", "right"]);

    let (label, children) = tree.into_parts();
    assert_eq!(label, "root");
    assert_eq!(children.len(), 3);
}

#[test]
fn subtree_orders() {
    let tree = nested();
    let post: Vec<_> = tree.iter_subtrees().map(Tree::label).collect();
    assert_eq!(post, ["inner", "left", "right", "root"]);
    let pre: Vec<_> = tree.iter_subtrees_topdown().map(Tree::label).collect();
    assert_eq!(pre, ["root", "left", "inner", "right"]);
}

#[test]
fn leaves_and_scanning() {
    let tree = nested();
    let leaves: Vec<_> = tree.leaves().copied().collect();
    assert_eq!(leaves, ["l1", "l2", "l3"]);
    let odd: Vec<_> = tree
        .scan_values(|leaf| leaf.ends_with('1') || leaf.ends_with('3'))
        .copied()
        .collect();
    assert_eq!(odd, ["l1", "l3"]);
}

#[test]
fn finding_subtrees() {
    let tree = Tree::new("add", [
        Tree::with_leaves("i", ["1"]).into(),
        Tree::new("neg", [Tree::with_leaves("i", ["2"]).into()]).into(),
    ]);
    assert_eq!(tree.find_label("i").count(), 2);
    assert_eq!(tree.find_label("sub").count(), 0);
    let single_child: Vec<_> = tree
        .find_pred(|t| t.len() == 1)
        .map(Tree::label)
        .collect();
    assert_eq!(single_child, ["i", "i", "neg"]);
}

#[test]
fn map_leaves_preserves_shape() {
    let tree = nested();
    let mapped = tree.map_leaves(|leaf| leaf.len());
    assert_eq!(mapped.label(), "root");
    assert_eq!(mapped.leaves().copied().collect::<Vec<_>>(), [2, 2, 2]);
    assert_eq!(
        mapped.iter_subtrees().map(Tree::label).collect::<Vec<_>>(),
        tree.iter_subtrees().map(Tree::label).collect::<Vec<_>>(),
    );
    // The source tree is left untouched
    assert_eq!(tree, nested());
}

#[test]
fn display() {
    assert_eq!(nested().to_string(), "root(left(l1, inner(l2)), l3, right())");
}

#[test]
fn pretty() {
    let expected = "\
root
  left
    l1
    inner\tl2
  l3
  right
";
    assert_eq!(nested().pretty(), expected);
    assert_eq!(sample().pretty_with("\t"), "a\n\tb\tx\n\tc\ty\n\td\tz\n");
}
