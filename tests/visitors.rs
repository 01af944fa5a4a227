//! Interpreters and transformers driven through the public API only.

use core::ops::{Add, Sub};
use kindling::{prelude::*, Error};
use pretty_assertions::assert_eq;

// a(b(), c(), 'd')
fn abcd() -> Tree {
    Tree::new("a", [
        Tree::leaf_node("b").into(),
        Tree::leaf_node("c").into(),
        Child::leaf("d".to_owned()),
    ])
}

// add(sub(i('3'), f('1.1')), i('1'))
fn arithmetic() -> Tree {
    Tree::new("add", [
        Tree::new("sub", [
            Tree::with_leaves("i", ["3".to_owned()]).into(),
            Tree::with_leaves("f", ["1.1".to_owned()]).into(),
        ])
        .into(),
        Tree::with_leaves("i", ["1".to_owned()]).into(),
    ])
}

fn chars(s: &str) -> Value {
    Value::List(
        s.chars()
            .map(|c| {
                let c = c.to_string();
                if c.chars().all(char::is_uppercase) || c == "e" {
                    Value::Str(c)
                } else {
                    Value::Leaf(c)
                }
            })
            .collect(),
    )
}

fn float(value: Value) -> f64 {
    f64::try_from(value).unwrap()
}

#[test]
fn interpreter() {
    let b_and_c = || {
        Interpreter::<String, Value>::builder()
            .rule("b", |_, _| Ok("B".into()))
            .rule("c", |_, _| Ok("C".into()))
    };

    let explicit = b_and_c()
        .rule("a", |interp, tree| {
            let mut values = interp.visit_children(tree)?;
            values.push("e".into());
            Ok(values.into())
        })
        .build();
    assert_eq!(explicit.visit(&abcd()).unwrap(), chars("BCde"));

    let decorated = b_and_c()
        .visited("a", |_, mut values| {
            values.push("e".into());
            Ok(values.into())
        })
        .build();
    assert_eq!(decorated.visit(&abcd()).unwrap(), chars("BCde"));

    let transparent = b_and_c().build();
    assert_eq!(transparent.visit(&abcd()).unwrap(), chars("BCd"));
}

#[test]
fn transformer() {
    let whole_sequence = Transformer::<String, Value>::builder()
        .inline("i", |s: String| s.parse::<i64>())
        .inline("f", |s: String| s.parse::<f64>())
        .rule("sub", |_, values| Ok((values[0].clone() - values[1].clone())?))
        .rule("add", |_, values| {
            Ok(values.into_iter().try_fold(Value::Int(0), |sum, x| sum + x)?)
        })
        .build();
    assert!((float(whole_sequence.transform(&arithmetic()).unwrap()) - 2.9).abs() < 1e-9);

    let all_inline = Transformer::<String, Value>::builder()
        .inlined()
        .rule("i", |s: String| s.parse::<i64>())
        .rule("f", |s: String| s.parse::<f64>())
        .method("sub", |_: &Transformer<'_, String, Value>, a: Value, b: Value| a - b)
        .rule("add", |a: Value, b: Value| a + b)
        .finish()
        .build();
    assert!((float(all_inline.transform(&arithmetic()).unwrap()) - 2.9).abs() < 1e-9);

    let operators = Transformer::<String, Value>::builder()
        .inlined()
        .rule("i", |s: String| s.parse::<i64>())
        .rule("f", |s: String| s.parse::<f64>())
        .rule("sub", <Value as Sub>::sub)
        .rule("add", <Value as Add>::add)
        .finish()
        .build();
    assert!((float(arithmetic().traverse(&operators).unwrap()) - 2.9).abs() < 1e-9);
}

#[test]
fn errors_carry_their_label() {
    let calc = Transformer::<String, Value>::builder()
        .missing_handler(MissingHandlerPolicy::Fail)
        .inline("i", |s: String| s.parse::<i64>())
        .inline("f", |s: String| s.parse::<f64>())
        .inline("sub", <Value as Sub>::sub)
        .inline("add", |a: Value, b: Value, c: Value| (a + b).and_then(|ab| ab + c))
        .build();
    let err = calc.transform(&arithmetic()).unwrap_err();
    assert!(matches!(err, Error::ArityMismatch { expected: 3, found: 2, .. }));
    assert_eq!(err.label(), Some("add"));
    assert_eq!(
        err.to_string(),
        "handler for `add` takes 3 argument(s), but the node has 2 child(ren)",
    );

    let bad = Tree::with_leaves("i", ["three".to_owned()]);
    let err = calc.transform(&bad).unwrap_err();
    assert_eq!(err.label(), Some("i"));
    assert!(err.to_string().starts_with("handler for `i` failed: "));
}
