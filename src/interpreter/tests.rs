use super::*;
use core::cell::Cell;
use pretty_assertions::assert_eq;
use crate::{error::Error, value::Value};

// a(b(), c(), 'd')
fn abcd() -> Tree {
    Tree::new("a", [
        Tree::leaf_node("b").into(),
        Tree::leaf_node("c").into(),
        Child::leaf("d".to_owned()),
    ])
}

fn letters(value: Value) -> String {
    match value {
        Value::List(values) => values.into_iter().map(letters).collect(),
        Value::Leaf(s) | Value::Str(s) => s,
        other => panic!("unexpected value: {:?}", other),
    }
}

fn with_bc<'h>() -> InterpreterBuilder<'h, String, Value> {
    Interpreter::builder()
        .rule("b", |_, _| Ok("B".into()))
        .rule("c", |_, _| Ok("C".into()))
}

#[test]
fn root_handler_drives_recursion() {
    let interp = with_bc()
        .rule("a", |interp, tree| {
            let mut values = interp.visit_children(tree)?;
            values.push("e".into());
            Ok(Value::List(values))
        })
        .build();
    assert_eq!(letters(interp.visit(&abcd()).unwrap()), "BCde");
}

#[test]
fn visited_handler_receives_children() {
    let interp = with_bc()
        .visited("a", |_, mut values| {
            values.push("e".into());
            Ok(Value::List(values))
        })
        .build();
    assert_eq!(letters(interp.visit(&abcd()).unwrap()), "BCde");
}

#[test]
fn labels_without_handlers_are_transparent() {
    let interp = with_bc().build();
    assert_eq!(
        interp.visit(&abcd()).unwrap(),
        Value::List(vec!["B".into(), "C".into(), Value::Leaf("d".to_owned())]),
    );
    // Nested unhandled nodes become nested lists
    let tree = Tree::new("x", [Tree::new("y", [Tree::leaf_node("z").into()]).into()]);
    assert_eq!(
        with_bc().build().visit(&tree).unwrap(),
        Value::List(vec![Value::List(vec![Value::List(Vec::new())])]),
    );
}

#[test]
fn catch_all_replaces_the_fallback() {
    let interp = with_bc()
        .catch_all(|interp, tree| {
            let mut values = vec![Value::Str(tree.label().to_uppercase())];
            values.extend(interp.visit_children(tree)?);
            Ok(Value::List(values))
        })
        .build();
    assert_eq!(letters(interp.visit(&abcd()).unwrap()), "ABCd");
}

#[test]
fn handlers_choose_what_to_visit() {
    // or(true(), boom()): `boom` must never run
    let tree = Tree::new("or", [Tree::leaf_node("true").into(), Tree::leaf_node("boom").into()]);
    let booms = Cell::new(0_u32);
    let interp = Interpreter::<String, Value>::builder()
        .rule("true", |_, _| Ok(true.into()))
        .rule("boom", |_, _| {
            booms.set(booms.get() + 1);
            Err(Error::handler("boom", "evaluated"))
        })
        .rule("or", |interp, tree| {
            for operand in tree.iter().filter_map(Child::as_tree) {
                if bool::try_from(interp.visit(operand)?)? {
                    return Ok(true.into());
                }
            }
            Ok(false.into())
        })
        .build();
    assert_eq!(interp.visit(&tree).unwrap(), Value::Bool(true));
    assert_eq!(booms.get(), 0);
}

#[test]
fn first_error_aborts() {
    // s(fail(), later())
    let tree = Tree::new("s", [Tree::leaf_node("fail").into(), Tree::leaf_node("later").into()]);
    let visited_later = Cell::new(false);
    let interp = Interpreter::<String, Value>::builder()
        .rule("fail", |_, _| Err(Error::MissingHandler { label: "nested".to_owned() }))
        .rule("later", |_, _| {
            visited_later.set(true);
            Ok(Value::Unit)
        })
        .build();
    match interp.visit(&tree) {
        Err(Error::MissingHandler { label }) => assert_eq!(label, "nested"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(!visited_later.get());
}

#[test]
fn inline_handlers() {
    // pair('x', y())
    let tree = Tree::new("pair", [Child::leaf("x".to_owned()), Tree::leaf_node("y").into()]);
    let interp = Interpreter::<String, Value>::builder()
        .rule("y", |_, _| Ok(2.into()))
        .inline("pair", |x: String, y: i64| format!("{}{}", x, y))
        .build();
    assert_eq!(interp.visit(&tree).unwrap(), Value::Str("x2".to_owned()));

    let wrong = Interpreter::<String, Value>::builder()
        .inline("pair", |x: String| x)
        .build();
    assert!(matches!(
        wrong.visit(&tree),
        Err(Error::ArityMismatch { expected: 1, found: 2, .. }),
    ));

    let method = Interpreter::<String, Value>::builder()
        .rule("y", |_, _| Ok(2.into()))
        .inline_method("pair", |interp: &Interpreter<'_, String, Value>, _: Value, y: i64| {
            interp.handlers().len() as i64 * y
        })
        .build();
    assert_eq!(method.visit(&tree).unwrap(), Value::Int(4));
}

#[derive(Debug, PartialEq)]
struct LeafCount(usize);
impl<L> TreeValue<L> for LeafCount {
    fn from_leaf(_: L) -> Self {
        Self(1)
    }
    fn from_list(values: Vec<Self>) -> Self {
        Self(values.iter().map(|c| c.0).sum())
    }
    fn from_node(_: String, children: Vec<Self>) -> Self {
        <Self as TreeValue<L>>::from_list(children)
    }
}

#[test]
fn custom_value_types() {
    let tree = Tree::new("r", [
        Tree::with_leaves("p", ["a", "b"]).into(),
        Child::Leaf("c"),
        Tree::with_leaves("ignored", ["d", "e", "f"]).into(),
    ]);
    let interp = Interpreter::<&str, LeafCount>::builder()
        .rule("ignored", |_, _| Ok(LeafCount(0)))
        .build();
    assert_eq!(interp.visit(&tree).unwrap(), LeafCount(3));
    assert_eq!(tree.traverse(&interp).unwrap(), LeafCount(3));

    // Unhandled nodes rebuilt by a transformer count their leaves too
    let transformer = crate::transformer::Transformer::<&str, LeafCount>::builder()
        .rule("ignored", |_, _| Ok(LeafCount(0)))
        .build();
    assert_eq!(transformer.transform(&tree).unwrap(), LeafCount(3));
}

#[test]
fn input_is_left_untouched() {
    let tree = abcd();
    let interp = with_bc().build();
    let _ = interp.visit(&tree).unwrap();
    let _ = interp.visit(&tree).unwrap();
    assert_eq!(tree, abcd());
}

#[test]
fn debug() {
    let interp = with_bc().rule("b", |_, _| Ok(Value::Unit)).build();
    assert_eq!(
        format!("{:?}", interp),
        r#"Interpreter { handlers: Handlers { labels: ["b", "c"], catch_all: false } }"#,
    );
}
