//! End-to-end evaluation: declaration text in, invocation result out

use crate::callable::Callable;
use crate::context::{shared_context, ContextConfig, ResolutionContext};
use crate::conversion::transform;
use crate::descriptor::ParameterDeclaration;
use crate::error::{ErrorKind, ResolveError};
use crate::signature::parse_signature;
use crate::value::Value;
use crate::warning::ResolveWarning;
use pretty_assertions::assert_eq;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A callable that records the arguments of every call and returns how many
/// it received
fn spy(declaration: &str) -> (Callable, Arc<Mutex<Vec<Vec<Value>>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&calls);
    let callable = Callable::from_declaration(declaration, move |arguments: &[Value]| {
        recorder.lock().unwrap().push(arguments.to_vec());
        Value::from(arguments.len() as i64)
    });
    (callable, calls)
}

#[test]
fn test_zero_parameter_callable() {
    let mut context = ResolutionContext::new();
    let callable = Callable::from_declaration("function () { return 42; }", |arguments: &[Value]| {
        assert!(arguments.is_empty());
        Value::from(42)
    });

    assert_eq!(context.evaluate(&Value::Function(callable)).unwrap(), Value::from(42));
}

#[test]
fn test_untyped_value_passes_through_unchanged() {
    let mut context = ResolutionContext::new();
    let config = Value::object([("port", Value::from(8080))]);
    context.add_parameter("x", config.clone(), None);

    assert_eq!(context.evaluate(&Value::from("x")).unwrap(), config);
}

#[test]
fn test_json_rule_stringifies_object() {
    let mut context = ResolutionContext::new();
    context.add_transform(
        "json",
        transform(|value| value.to_json_string().map(Value::String).unwrap_or_default()),
    );
    context.add_parameter("data", Value::object([("a", Value::from(1))]), None);

    let (callable, calls) = spy("function (data:json) {}");
    context.run(&callable).unwrap();

    assert_eq!(calls.lock().unwrap()[0], vec![Value::from(r#"{"a":1}"#)]);
}

#[test]
fn test_missing_value_resolves_to_undefined() {
    let mut context = ResolutionContext::new();

    assert_eq!(context.evaluate(&Value::from("nothing")).unwrap(), Value::Undefined);
}

#[test]
fn test_unset_cell_resolves_to_undefined_even_with_unknown_type() {
    let mut context = ResolutionContext::new();
    context.add_parameter("pending", Value::Undefined, Some("json"));

    assert_eq!(context.resolve("pending:json").unwrap(), Value::Undefined);
}

#[test]
fn test_unknown_type_aborts_evaluation() {
    let mut context = ResolutionContext::new();
    context.add_parameter("data", Value::from("x"), None);
    let (callable, calls) = spy("(data:toml) => data");

    let error = context.run(&callable).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Reference);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_arguments_follow_declaration_order() {
    let mut context = ResolutionContext::new();
    context.set_parameters(Value::object([
        ("b", Value::from("second")),
        ("a", Value::from("first")),
    ]))
    .unwrap();
    let (callable, calls) = spy("(a, b) => a");

    context.run(&callable).unwrap();

    assert_eq!(
        calls.lock().unwrap()[0],
        vec![Value::from("first"), Value::from("second")]
    );
}

#[test]
fn test_missing_middle_parameter_is_passed_as_undefined() {
    let mut context = ResolutionContext::new();
    context.add_parameter("a", Value::from(1), None);
    context.add_parameter("c", Value::from(3), None);
    let (callable, calls) = spy("function (a, b, c) {}");

    assert_eq!(context.run(&callable).unwrap(), Value::from(3));
    assert_eq!(
        calls.lock().unwrap()[0],
        vec![Value::from(1), Value::Undefined, Value::from(3)]
    );
}

#[test]
fn test_unresolved_trailing_variadic_is_omitted() {
    let mut context = ResolutionContext::new();
    context.add_parameter("first", Value::from(1), None);
    let (callable, calls) = spy("(first, ...rest) => rest");

    assert_eq!(context.run(&callable).unwrap(), Value::from(1));
    assert_eq!(calls.lock().unwrap()[0], vec![Value::from(1)]);
}

#[test]
fn test_resolved_trailing_variadic_is_passed() {
    let mut context = ResolutionContext::new();
    context.add_parameter("rest", Value::List(vec![Value::from(2), Value::from(3)]), None);
    let (callable, calls) = spy("(first, ...rest) => rest");

    context.run(&callable).unwrap();

    assert_eq!(
        calls.lock().unwrap()[0],
        vec![Value::Undefined, Value::List(vec![Value::from(2), Value::from(3)])]
    );
}

#[test]
fn test_default_applies_when_unresolved() {
    let mut context = ResolutionContext::new();
    let (callable, calls) = spy("function (retries = 3, name) {}");

    context.run(&callable).unwrap();

    assert_eq!(calls.lock().unwrap()[0], vec![Value::from(3), Value::Undefined]);
}

#[test]
fn test_resolved_value_beats_default() {
    let mut context = ResolutionContext::new();
    context.add_parameter("retries", Value::from(9), None);
    let (callable, calls) = spy("function (retries = 3) {}");

    context.run(&callable).unwrap();

    assert_eq!(calls.lock().unwrap()[0], vec![Value::from(9)]);
}

#[test]
fn test_variadic_type_tag_warning_is_collected() {
    let mut context = ResolutionContext::new();
    context.add_parameter("items", Value::from("one"), None);
    let (callable, calls) = spy("function (...items:str) {}");

    context.run(&callable).unwrap();

    assert_eq!(calls.lock().unwrap()[0], vec![Value::from("one")]);
    assert_eq!(
        context.take_warnings(),
        vec![ResolveWarning::VariadicTypeTag {
            parameter: "...items:str".to_string()
        }]
    );
    assert!(context.warnings().is_empty());
}

#[test]
fn test_explicit_parameter_list() {
    let mut context = ResolutionContext::new().with_standard_adapters();
    context.add_parameter("count", Value::from("12"), None);
    let callable = Callable::with_parameters(
        vec![
            ParameterDeclaration::typed("count", "number"),
            ParameterDeclaration::named("label").with_default(|| Value::from("none")),
            ParameterDeclaration::variadic("extra"),
        ],
        |arguments: &[Value]| Value::List(arguments.to_vec()),
    );

    assert_eq!(
        context.run(&callable).unwrap(),
        Value::List(vec![Value::from(12), Value::from("none")])
    );
}

#[test]
fn test_evaluate_rejects_other_kinds() {
    let mut context = ResolutionContext::new();

    for target in [Value::from(1), Value::Null, Value::Boolean(true), Value::List(vec![])] {
        let error = context.evaluate(&target).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Type);
        assert!(matches!(error, ResolveError::UnsupportedTarget { .. }));
    }
}

#[test]
fn test_malformed_declaration_is_type_error() {
    let mut context = ResolutionContext::new();
    let callable = Callable::from_declaration("not a function", |_: &[Value]| Value::Undefined);

    let error = context.run(&callable).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Type);
    assert!(matches!(error, ResolveError::MalformedDeclaration { .. }));
}

#[test]
fn test_set_parameters_rejects_non_objects() {
    let mut context = ResolutionContext::new();

    let error = context.set_parameters(Value::from("nope")).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Type);
    assert!(matches!(error, ResolveError::NotAnObject { .. }));
}

#[test]
fn test_set_parameters_skips_undefined_and_merges() {
    let mut context = ResolutionContext::new();
    context.add_parameter("kept", Value::from(1), None);
    context
        .set_parameters(Value::object([
            ("skipped", Value::Undefined),
            ("added", Value::from(2)),
        ]))
        .unwrap();

    assert!(context.cell("skipped").is_none());
    assert_eq!(context.cell("kept").unwrap().value(), &Value::from(1));
    assert_eq!(context.cell("added").unwrap().type_tag(), "number");
}

#[test]
fn test_reregistered_value_replaces_cell() {
    let mut context = ResolutionContext::new();
    context.add_parameter("port", Value::from(80), Some("http"));
    context.add_parameter("port", Value::from("443"), None);

    let cell = context.cell("port").unwrap();
    assert_eq!(cell.value(), &Value::from("443"));
    assert_eq!(cell.type_tag(), "string");
    assert_eq!(context.cells().count(), 1);
}

#[test]
fn test_clear_parameters() {
    let mut context = ResolutionContext::new();
    context.add_parameter("a", Value::from(1), None);
    context.clear_parameters();

    assert_eq!(context.resolve("a").unwrap(), Value::Undefined);
}

#[test]
fn test_parse_signature() {
    let config = ContextConfig::default();
    let (callable, _) = spy("function (a:json, b = 2, ...rest) {}");

    assert_eq!(
        parse_signature(&Value::Function(callable), &config).unwrap(),
        vec!["a:json", "b = 2", "...rest"]
    );

    let explicit = Callable::with_parameters(
        vec![ParameterDeclaration::typed("a", "json"), ParameterDeclaration::variadic("rest")],
        |_: &[Value]| Value::Undefined,
    );
    assert_eq!(
        parse_signature(&Value::Function(explicit), &config).unwrap(),
        vec!["a:json", "...rest"]
    );
}

#[test]
fn test_parse_signature_requires_callable() {
    let error = parse_signature(&Value::from("function () {}"), &ContextConfig::default()).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Type);
    assert!(matches!(error, ResolveError::NotCallable { .. }));
}

#[test]
fn test_describe_keeps_spans() {
    let mut context = ResolutionContext::new();
    let (callable, _) = spy("(alpha, beta:json) => alpha");

    let descriptor = context.describe(&callable).unwrap();
    let beta = &descriptor.parameters[1];
    let span = beta.span().unwrap();

    assert_eq!(&"(alpha, beta:json) => alpha"[span.start..span.end], "beta:json");
    assert_eq!(beta.declared_type(), "json");
}

#[test]
fn test_callable_values_resolve_like_any_other() {
    let mut context = ResolutionContext::new();
    let (inner, _) = spy("() => 0");
    context.add_parameter("handler", Value::Function(inner.clone()), None);

    let cell = context.cell("handler").unwrap();
    assert_eq!(cell.type_tag(), "function");
    assert_eq!(context.resolve("handler").unwrap(), Value::Function(inner));
}

#[test]
fn test_shared_context_keeps_state_between_locks() {
    shared_context().add_parameter("shared_context_marker", Value::from("here"), None);

    assert_eq!(
        crate::evaluate(&Value::from("shared_context_marker")).unwrap(),
        Value::from("here")
    );
}

#[test]
fn test_prepare_resolves_without_invoking() {
    let mut context = ResolutionContext::new();
    context.add_parameter("a", Value::from(1), None);
    let (callable, calls) = spy("(a, ...rest) => a");

    let prepared = context.prepare(&callable).unwrap();

    assert_eq!(prepared.arguments, vec![Value::from(1)]);
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(prepared.invoke(), Value::from(1));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn test_callable_body_may_evaluate_shared_context() {
    shared_context().add_parameter("nested_dependency", Value::from("inner"), None);
    let outer = Callable::from_declaration("() => 0", |_: &[Value]| {
        crate::evaluate(&Value::from("nested_dependency")).unwrap_or_default()
    });

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        sender.send(crate::evaluate(&Value::Function(outer))).ok();
    });
    let result = receiver
        .recv_timeout(Duration::from_secs(5))
        .expect("nested evaluate did not return");

    assert_eq!(result.unwrap(), Value::from("inner"));
}

#[test]
fn test_shared_evaluate_drains_warnings() {
    let (callable, _) = spy("function (...shared_items:str) {}");

    crate::evaluate(&Value::Function(callable.clone())).unwrap();
    crate::evaluate(&Value::Function(callable)).unwrap();

    assert!(shared_context().warnings().is_empty());
}
