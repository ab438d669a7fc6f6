// Declaration parsing module
// Locates the parameter list of a callable declaration and splits it

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, SignatureParser};
use pest::Parser;

impl SignatureParser {
    /// Parse a callable declaration into its head and raw parameter list
    pub fn parse_declaration(input: &str) -> ParseResult<Signature> {
        let normalized = Self::normalize(input)?;

        let declaration = Self::parse(Rule::declaration, &normalized)
            .map_err(|error| ParseError::unrecognized_declaration(error, normalized.clone()))?
            .next()
            .ok_or_else(|| ParseError::empty_parse(Rule::declaration))?;

        let span = Self::extract_span(&declaration);
        let mut form = DeclarationForm::Arrow;
        let mut name = None;
        let mut is_async = false;
        let mut parameter_source = None;
        let mut shorthand = None;
        let mut body = None;

        for pair in declaration.into_inner() {
            match pair.as_rule() {
                Rule::parenthesized_head => {
                    for inner in pair.into_inner() {
                        match inner.as_rule() {
                            Rule::async_keyword => is_async = true,
                            Rule::function_keyword => form = DeclarationForm::Function,
                            Rule::function_name => {
                                // Method style `name(a) { .. }` counts as a function too
                                form = DeclarationForm::Function;
                                name = Some(inner.as_str().to_string());
                            }
                            Rule::parameter_source => parameter_source = Some(inner),
                            _ => {}
                        }
                    }
                }
                Rule::shorthand_head => {
                    form = DeclarationForm::Shorthand;
                    for inner in pair.into_inner() {
                        match inner.as_rule() {
                            Rule::async_keyword => is_async = true,
                            Rule::shorthand_parameter => shorthand = Some(inner),
                            _ => {}
                        }
                    }
                }
                Rule::body => {
                    body = pair
                        .into_inner()
                        .find(|inner| inner.as_rule() == Rule::body_text)
                        .map(|inner| inner.as_str().to_string());
                }
                _ => {}
            }
        }

        let parameters = match (shorthand, parameter_source) {
            (Some(parameter), _) => vec![RawParameter {
                text: parameter.as_str().to_string(),
                span: Self::extract_span(&parameter),
            }],
            (None, Some(source)) => {
                let mut text = source.as_str();
                if body.is_none() {
                    // Bare head such as `(a, b)`: the closing delimiter was
                    // never consumed as part of a body introducer
                    text = text.trim_end();
                    text = text.strip_suffix(')').unwrap_or(text);
                }
                Self::split_parameters(text, source.as_span().start())
            }
            (None, None) => Vec::new(),
        };

        Ok(Signature {
            source: normalized,
            form,
            name,
            is_async,
            parameters,
            body,
            span,
        })
    }

    /// Split parameter text on every comma.
    ///
    /// Commas are not matched against brackets, so `a = [1, 2]` becomes two
    /// pieces. Pieces that are empty after trimming are dropped.
    pub(crate) fn split_parameters(text: &str, offset: usize) -> Vec<RawParameter> {
        let mut parameters = Vec::new();
        let mut cursor = offset;

        for piece in text.split(',') {
            let leading = piece.len() - piece.trim_start().len();
            let trimmed = piece.trim();
            if !trimmed.is_empty() {
                let start = cursor + leading;
                parameters.push(RawParameter {
                    text: trimmed.to_string(),
                    span: Span::new(start, start + trimmed.len()),
                });
            }
            cursor += piece.len() + 1;
        }

        parameters
    }
}
