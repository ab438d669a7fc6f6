// Parameter parsing module
// Handles variadic markers, default clauses and embedded type tags

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, SignatureParser};
use pest::Parser;

impl SignatureParser {
    /// Parse one parameter's text.
    ///
    /// The default clause starts at the first `=`; a leading `...` on what
    /// remains marks the parameter variadic.
    pub fn parse_parameter(input: &str) -> ParseResult<ParameterSyntax> {
        let parameter = Self::parse(Rule::parameter, input)
            .map_err(|error| ParseError::from_pest_error(error, input.to_string()))?
            .next()
            .ok_or_else(|| ParseError::empty_parse(Rule::parameter))?;

        let mut is_variadic = false;
        let mut name_text = String::new();
        let mut default_expression = None;

        for pair in parameter.into_inner() {
            match pair.as_rule() {
                Rule::variadic_marker => is_variadic = true,
                Rule::parameter_name => name_text = pair.as_str().trim().to_string(),
                Rule::default_clause => {
                    default_expression = Some(
                        pair.into_inner()
                            .find(|inner| inner.as_rule() == Rule::default_expression)
                            .map(|inner| inner.as_str().trim().to_string())
                            .unwrap_or_default(),
                    );
                }
                _ => {}
            }
        }

        Ok(ParameterSyntax::new(name_text, default_expression, is_variadic))
    }
}

/// Split `name<delimiter>type` on the last delimiter.
///
/// The name keeps any earlier delimiters. An empty type suffix yields no
/// type tag.
pub fn split_type_tag(name_text: &str, delimiter: char) -> (String, Option<String>) {
    match name_text.rsplit_once(delimiter) {
        Some((name, tag)) if !tag.trim().is_empty() => {
            (name.trim().to_string(), Some(tag.trim().to_string()))
        }
        Some((name, _)) => (name.trim().to_string(), None),
        None => (name_text.to_string(), None),
    }
}
