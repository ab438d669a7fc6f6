//! Signature extraction for callable values

use crate::callable::ParameterSource;
use crate::context::ContextConfig;
use crate::error::{ResolveError, Result};
use crate::value::Value;
use provide_parser::RawParameter;

/// The raw parameter texts of a callable value, in declaration order.
///
/// Explicitly declared parameters are written out as text using the
/// configured type delimiter. Anything other than a function is a type
/// error.
pub fn parse_signature(target: &Value, config: &ContextConfig) -> Result<Vec<String>> {
    let callable = target.as_callable().ok_or_else(|| ResolveError::NotCallable {
        found: target.type_name().to_string(),
    })?;

    match callable.parameters() {
        ParameterSource::Declaration(text) => Ok(declaration_parameters(text)?
            .into_iter()
            .map(|raw| raw.text)
            .collect()),
        ParameterSource::Explicit(parameters) => Ok(parameters
            .iter()
            .map(|parameter| parameter.to_text(config.type_delimiter))
            .collect()),
    }
}

pub(crate) fn declaration_parameters(declaration: &str) -> Result<Vec<RawParameter>> {
    let signature = provide_parser::parse_declaration(declaration)
        .map_err(|error| ResolveError::malformed_declaration(declaration, error))?;
    Ok(signature.parameters)
}
