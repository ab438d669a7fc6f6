//! Callables and their per-evaluation descriptors

use crate::descriptor::{ParameterDeclaration, ParameterDescriptor};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// The code a callable runs with its positional arguments
pub type CallableBody = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Where a callable's parameter list comes from
#[derive(Debug, Clone)]
pub enum ParameterSource {
    /// Declaration text, e.g. `function (config:json, ...rest) {}`
    Declaration(String),
    Explicit(Vec<ParameterDeclaration>),
}

#[derive(Clone)]
pub struct Callable {
    parameters: ParameterSource,
    body: CallableBody,
}

impl Callable {
    pub fn from_declaration<F>(declaration: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            parameters: ParameterSource::Declaration(declaration.into()),
            body: Arc::new(body),
        }
    }

    pub fn with_parameters<F>(parameters: Vec<ParameterDeclaration>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            parameters: ParameterSource::Explicit(parameters),
            body: Arc::new(body),
        }
    }

    pub fn parameters(&self) -> &ParameterSource {
        &self.parameters
    }

    pub fn declaration(&self) -> Option<&str> {
        match &self.parameters {
            ParameterSource::Declaration(text) => Some(text),
            ParameterSource::Explicit(_) => None,
        }
    }

    /// Invoke the body directly, bypassing resolution
    pub fn call(&self, arguments: &[Value]) -> Value {
        (self.body)(arguments)
    }

    /// Two callables are equal when they share the same body
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameters {
            ParameterSource::Declaration(text) => write!(f, "{}", text),
            ParameterSource::Explicit(parameters) => {
                let names: Vec<&str> = parameters.iter().map(|p| p.name()).collect();
                write!(f, "[callable ({})]", names.join(", "))
            }
        }
    }
}

/// A callable together with its parameters, read for one evaluation
#[derive(Debug, Clone)]
pub struct CallableDescriptor {
    pub callable: Callable,
    pub parameters: Vec<ParameterDescriptor>,
}

impl CallableDescriptor {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Index of the last parameter when it is variadic
    pub fn trailing_variadic(&self) -> Option<usize> {
        match self.parameters.last() {
            Some(parameter) if parameter.is_variadic() => Some(self.parameters.len() - 1),
            _ => None,
        }
    }
}

/// A callable with its resolved arguments.
///
/// Holds no reference to the context it was prepared in.
#[derive(Debug, Clone)]
pub struct PreparedCall {
    pub callable: Callable,
    pub arguments: Vec<Value>,
}

impl PreparedCall {
    pub fn invoke(&self) -> Value {
        tracing::debug!(callable = %self.callable, "invoking callable");
        self.callable.call(&self.arguments)
    }
}
