//! Trees and values survive serialization unchanged.
#![cfg(feature = "serde")]

use kindling::{Tree, Child, Value, Transformer};
use pretty_assertions::assert_eq;

// a(b(x), c(y), d(z))
fn sample() -> Tree {
    Tree::new("a", ["b", "c", "d"].iter().zip(["x", "y", "z"].iter()).map(|(label, leaf)| {
        Tree::with_leaves(*label, [(*leaf).to_owned()]).into()
    }))
}

#[test]
fn json_round_trip() {
    let tree = sample();
    let json = serde_json::to_string(&tree.clone()).unwrap();
    let back: Tree = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn json_shape() {
    let tree = Tree::new("a", [Tree::leaf_node("b").into(), Child::leaf("d".to_owned())]);
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        serde_json::json!({
            "label": "a",
            "children": [
                { "tree": { "label": "b", "children": [] } },
                { "leaf": "d" },
            ],
        }),
    );
}

#[test]
fn bincode_round_trip() {
    let tree = sample();
    let bytes = bincode::serialize(&tree).unwrap();
    let back: Tree = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn values_round_trip() {
    let partial = Transformer::<String, Value>::builder()
        .inline("x", |s: String| s.len() as i64)
        .build();
    let tree = Tree::new("r", [
        Tree::with_leaves("x", ["abc".to_owned()]).into(),
        Child::leaf("raw".to_owned()),
    ]);
    let value = partial.transform(&tree).unwrap();
    assert_eq!(
        value,
        Value::Tree(Tree::new("r", [Child::Leaf(Value::Int(3)), Child::Leaf(Value::Leaf("raw".to_owned()))])),
    );
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);
    let bytes = bincode::serialize(&value).unwrap();
    assert_eq!(bincode::deserialize::<Value>(&bytes).unwrap(), value);
}
