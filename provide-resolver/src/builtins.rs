//! Standard conversion rules.
//!
//! Covers the common output types: `json`, `string`, `number`, `boolean`
//! and `list`. Each rule except `json` also answers to a native alias.

use crate::context::ResolutionContext;
use crate::conversion::{transform, ConversionRule};
use crate::value::Value;

/// Register all standard rules with the context, replacing same-named ones
pub fn register_standard_adapters(context: &mut ResolutionContext) {
    for rule in standard_adapters() {
        context.add_adapter(rule);
    }
}

pub fn standard_adapters() -> Vec<ConversionRule> {
    vec![
        create_json_adapter(),
        create_string_adapter(),
        create_number_adapter(),
        create_boolean_adapter(),
        create_list_adapter(),
    ]
}

/// Whole-value JSON stringification; values without a JSON form stay undefined
fn create_json_adapter() -> ConversionRule {
    ConversionRule::from_transform(
        "json",
        transform(|value| {
            value
                .to_json_string()
                .map(Value::String)
                .unwrap_or(Value::Undefined)
        }),
    )
}

fn create_string_adapter() -> ConversionRule {
    ConversionRule::new("string")
        .with_alias("String")
        // Objects render as JSON rather than `[object Object]`
        .with_transform(
            "object",
            transform(|value| {
                let text = value
                    .to_json_string()
                    .unwrap_or_else(|| value.to_string_repr());
                Value::String(text)
            }),
        )
        .with_fallback(transform(|value| Value::String(value.to_string_repr())))
}

fn create_number_adapter() -> ConversionRule {
    ConversionRule::new("number")
        .with_alias("f64")
        .with_transform("number", transform(|value| value))
        .with_fallback(transform(|value| Value::Number(value.to_number())))
}

fn create_boolean_adapter() -> ConversionRule {
    ConversionRule::new("boolean")
        .with_alias("bool")
        .with_fallback(transform(|value| Value::Boolean(value.is_truthy())))
}

fn create_list_adapter() -> ConversionRule {
    ConversionRule::new("list")
        .with_alias("Vec")
        .with_transform(
            "object",
            transform(|value| match value {
                Value::List(items) => Value::List(items),
                Value::Null => Value::List(Vec::new()),
                other => Value::List(vec![other]),
            }),
        )
        .with_fallback(transform(|value| Value::List(vec![value])))
}
