//! Resolution error types.
//!
//! Every error belongs to one of two kinds: malformed input
//! ([`ErrorKind::Type`]) or a declared type no conversion rule answers to
//! ([`ErrorKind::Reference`]).

use miette::Diagnostic;
use provide_parser::ParseError;
use std::fmt;
use thiserror::Error;

/// The two error kinds callers distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Reference,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Type => write!(f, "TypeError"),
            ErrorKind::Reference => write!(f, "ReferenceError"),
        }
    }
}

/// Errors that abort an evaluation
#[derive(Error, Diagnostic, Debug)]
pub enum ResolveError {
    #[error("Type error: expected a callable, found {found}")]
    #[diagnostic(
        code(provide::resolve::not_callable),
        help("Only function values carry a parameter declaration")
    )]
    NotCallable { found: String },

    #[error("Type error: expected an object of named values, found {found}")]
    #[diagnostic(
        code(provide::resolve::not_an_object),
        help("Bulk registration takes an object whose keys are parameter names")
    )]
    NotAnObject { found: String },

    #[error("Type error: cannot evaluate a value of type {found}")]
    #[diagnostic(
        code(provide::resolve::unsupported_target),
        help("Evaluate a parameter declaration string or a function")
    )]
    UnsupportedTarget { found: String },

    #[error("Type error: malformed declaration `{declaration}`")]
    #[diagnostic(code(provide::resolve::malformed_declaration))]
    MalformedDeclaration {
        declaration: String,
        #[source]
        #[diagnostic_source]
        error: ParseError,
    },

    #[error("Reference error: no conversion rule for type '{type_name}'")]
    #[diagnostic(
        code(provide::resolve::no_conversion_rule),
        help("Register an adapter for '{type_name}', or one aliased to it, before resolving `{parameter}`")
    )]
    NoConversionRule { type_name: String, parameter: String },
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::NotCallable { .. }
            | ResolveError::NotAnObject { .. }
            | ResolveError::UnsupportedTarget { .. }
            | ResolveError::MalformedDeclaration { .. } => ErrorKind::Type,
            ResolveError::NoConversionRule { .. } => ErrorKind::Reference,
        }
    }

    pub fn malformed_declaration(declaration: &str, error: ParseError) -> Self {
        ResolveError::MalformedDeclaration {
            declaration: declaration.to_string(),
            error,
        }
    }

    pub fn no_conversion_rule(type_name: &str, parameter: &str) -> Self {
        ResolveError::NoConversionRule {
            type_name: type_name.to_string(),
            parameter: parameter.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
