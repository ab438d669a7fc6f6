//! Tests for value classification and conversions

use crate::callable::Callable;
use crate::cell::ValueCell;
use crate::value::{Value, ValueKind};
use pretty_assertions::assert_eq;

#[test]
fn test_value_kinds() {
    let cases = [
        (Value::Undefined, ValueKind::Undefined),
        (Value::Null, ValueKind::Object),
        (Value::Boolean(true), ValueKind::Boolean),
        (Value::from(1.5), ValueKind::Number),
        (Value::from("s"), ValueKind::String),
        (Value::List(vec![]), ValueKind::Object),
        (Value::object([("k", Value::Null)]), ValueKind::Object),
        (
            Value::Function(Callable::from_declaration("() => 1", |_: &[Value]| Value::from(1))),
            ValueKind::Function,
        ),
    ];

    for (value, kind) in cases {
        assert_eq!(value.kind(), kind, "kind of {:?}", value);
    }
}

#[test]
fn test_cell_infers_type_from_value() {
    assert_eq!(ValueCell::new("n", Value::from(1), None).type_tag(), "number");
    assert_eq!(ValueCell::new("o", Value::Null, None).type_tag(), "object");
    assert_eq!(ValueCell::new("u", Value::Undefined, None).type_tag(), "undefined");
}

#[test]
fn test_cell_explicit_type_wins() {
    let cell = ValueCell::new("n", Value::from(1), Some("port"));

    assert_eq!(cell.type_tag(), "port");
    assert_eq!(cell.name(), "n");
}

#[test]
fn test_unset_cell_regardless_of_type() {
    assert!(ValueCell::new("a", Value::Undefined, Some("json")).is_unset());
    assert!(!ValueCell::new("a", Value::Null, None).is_unset());
}

#[test]
fn test_json_stringify_rules() {
    let value = Value::object([
        ("n", Value::from(1)),
        ("f", Value::from(1.5)),
        ("skip", Value::Undefined),
        ("list", Value::List(vec![Value::Undefined, Value::from("x")])),
    ]);

    assert_eq!(
        value.to_json_string().as_deref(),
        Some(r#"{"n":1,"f":1.5,"list":[null,"x"]}"#)
    );
    assert_eq!(Value::Undefined.to_json_string(), None);
    assert_eq!(Value::from(f64::NAN).to_json_string().as_deref(), Some("null"));
}

#[test]
fn test_object_key_order_is_preserved() {
    let value = Value::object([("z", Value::from(1)), ("a", Value::from(2))]);

    assert_eq!(value.to_json_string().as_deref(), Some(r#"{"z":1,"a":2}"#));
}

#[test]
fn test_from_json() {
    let value = Value::from_json(serde_json::json!({"a": [1, true, null], "b": "s"}));

    assert_eq!(
        value,
        Value::object([
            (
                "a",
                Value::List(vec![Value::from(1), Value::Boolean(true), Value::Null])
            ),
            ("b", Value::from("s")),
        ])
    );
}

#[test]
fn test_parse_literal() {
    assert_eq!(Value::parse_literal(" undefined ").unwrap(), Value::Undefined);
    assert_eq!(Value::parse_literal("[]").unwrap(), Value::List(vec![]));
    assert_eq!(Value::parse_literal("\"x\"").unwrap(), Value::from("x"));
    assert!(Value::parse_literal("'x'").is_err());
}

#[test]
fn test_string_repr() {
    assert_eq!(Value::from(3).to_string_repr(), "3");
    assert_eq!(Value::from(-0.0).to_string_repr(), "0");
    assert_eq!(Value::from(0.25).to_string_repr(), "0.25");
    assert_eq!(Value::from(f64::INFINITY).to_string_repr(), "Infinity");
    assert_eq!(
        Value::List(vec![Value::from(1), Value::Null, Value::from("b")]).to_string_repr(),
        "1,,b"
    );
    assert_eq!(Value::object([("a", Value::Null)]).to_string_repr(), "[object Object]");
}

#[test]
fn test_to_number() {
    assert_eq!(Value::from("  7 ").to_number(), 7.0);
    assert_eq!(Value::from("").to_number(), 0.0);
    assert_eq!(Value::Null.to_number(), 0.0);
    assert_eq!(Value::Boolean(true).to_number(), 1.0);
    assert_eq!(Value::List(vec![Value::from("5")]).to_number(), 5.0);
    assert!(Value::Undefined.to_number().is_nan());
    assert!(Value::from("seven").to_number().is_nan());
}

#[test]
fn test_callables_compare_by_identity() {
    let first = Callable::from_declaration("() => 1", |_: &[Value]| Value::from(1));
    let same_text = Callable::from_declaration("() => 1", |_: &[Value]| Value::from(1));

    assert_eq!(Value::Function(first.clone()), Value::Function(first.clone()));
    assert_ne!(Value::Function(first), Value::Function(same_text));
}
