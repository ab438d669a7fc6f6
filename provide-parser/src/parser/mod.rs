// Provide Parser
// Pest parser definition and shared helpers

use crate::ast::Span;
use crate::error::{ParseError, ParseResult};
use pest::Parser;
use pest_derive::Parser;

mod declarations;
mod parameters;

pub use parameters::split_type_tag;

#[derive(Parser)]
#[grammar = "signature.pest"]
pub struct SignatureParser;

impl SignatureParser {
    /// Remove block comments and fold line breaks into spaces.
    ///
    /// An unterminated `/*` swallows the rest of the input.
    pub fn normalize(input: &str) -> ParseResult<String> {
        let source = Self::parse(Rule::source, input)
            .map_err(|error| ParseError::from_pest_error(error, input.to_string()))?
            .next()
            .ok_or_else(|| ParseError::empty_parse(Rule::source))?;

        let mut normalized = String::with_capacity(input.len());
        for pair in source.into_inner() {
            if pair.as_rule() == Rule::source_text {
                normalized.push_str(pair.as_str());
            }
        }

        let normalized: String = normalized
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        Ok(normalized.trim().to_string())
    }

    pub(crate) fn extract_span(pair: &pest::iterators::Pair<Rule>) -> Span {
        let span = pair.as_span();
        Span::new(span.start(), span.end())
    }
}
