//! Provide resolver
//!
//! Supplies arguments to callables from a pool of named, typed values.
//!
//! A [`ResolutionContext`] owns value cells and conversion rules. Given a
//! callable, it reads the callable's parameter declaration (either parsed
//! from declaration text or given explicitly), resolves each parameter by
//! name, converts the stored value through the rule registered for the
//! parameter's declared type, and invokes the callable with the result.

#![allow(clippy::uninlined_format_args)]

pub mod builtins;
pub mod callable;
pub mod cell;
pub mod context;
pub mod conversion;
pub mod descriptor;
pub mod error;
pub mod signature;
pub mod value;
pub mod warning;

#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

// Re-export public API
pub use builtins::{register_standard_adapters, standard_adapters};
pub use callable::{Callable, CallableBody, CallableDescriptor, ParameterSource, PreparedCall};
pub use cell::ValueCell;
pub use context::{shared_context, ContextConfig, ResolutionContext};
pub use conversion::{identity, transform, AdapterRegistration, ConversionRule, Transform};
pub use descriptor::{DefaultThunk, ParameterDeclaration, ParameterDescriptor};
pub use error::{ErrorKind, ResolveError};
pub use signature::parse_signature;
pub use value::{Value, ValueKind};
pub use warning::ResolveWarning;

/// Evaluate a target against the process-wide shared context.
///
/// The context lock is released before a callable runs, so its body may
/// call `evaluate` again. Warnings recorded during the call are drained
/// once it has been prepared; they are logged as they are recorded.
pub fn evaluate(target: &Value) -> Result<Value, ResolveError> {
    let callable = match target {
        Value::Function(callable) => callable,
        other => return with_shared_context(|context| context.evaluate(other)),
    };

    let prepared = with_shared_context(|context| context.prepare(callable))?;
    Ok(prepared.invoke())
}

fn with_shared_context<T>(f: impl FnOnce(&mut ResolutionContext) -> T) -> T {
    let mut context = shared_context();
    let outcome = f(&mut context);
    context.take_warnings();
    outcome
}
