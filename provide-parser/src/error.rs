// Provide Parser Error Handling
// Error reporting with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error")]
    #[diagnostic(
        code(provide::parse::pest_error),
        help("Check the syntax near the highlighted location")
    )]
    PestError {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Unrecognized callable declaration")]
    #[diagnostic(
        code(provide::parse::unrecognized_declaration),
        help("Expected `function name(a, b) ..`, `(a, b) => ..` or `a => ..`")
    )]
    UnrecognizedDeclaration {
        #[source_code]
        src: String,
        #[label("no parameter list starts here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Parser produced no {rule} node")]
    #[diagnostic(code(provide::parse::empty_parse))]
    EmptyParse { rule: String },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match &error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new((*pos).into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new((*start).into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<&str> = positives
                    .iter()
                    .map(rule_to_user_friendly_description)
                    .collect();
                format!("{} (expected {})", error, expected.join(" or "))
            }
            _ => format!("{}", error),
        };

        ParseError::PestError { src, span, message }
    }

    /// Wrap a failed declaration parse: the input matched none of the
    /// accepted declaration heads
    pub fn unrecognized_declaration(error: pest::error::Error<Rule>, src: String) -> Self {
        match Self::from_pest_error(error, src) {
            ParseError::PestError { src, span, message } => {
                ParseError::UnrecognizedDeclaration { src, span, message }
            }
            other => other,
        }
    }

    pub fn empty_parse(rule: Rule) -> Self {
        ParseError::EmptyParse {
            rule: format!("{:?}", rule),
        }
    }

    /// Human readable detail, without the source excerpt
    pub fn message(&self) -> String {
        match self {
            ParseError::PestError { message, .. } => message.clone(),
            ParseError::UnrecognizedDeclaration { message, .. } => message.clone(),
            ParseError::EmptyParse { rule } => format!("no {} node", rule),
        }
    }
}

fn rule_to_user_friendly_description(rule: &Rule) -> &'static str {
    match rule {
        Rule::parenthesized_head => "a parenthesized parameter list",
        Rule::shorthand_head | Rule::shorthand_parameter => "a single parameter followed by `=>`",
        Rule::function_keyword => "the `function` keyword",
        Rule::function_name => "a function name",
        Rule::async_keyword => "the `async` keyword",
        Rule::body | Rule::body_opening => "a body introducer (`) {`, `) =>`, `] {` or `=>`)",
        Rule::parameter_name => "a parameter name",
        Rule::default_clause => "`=` followed by a default value",
        Rule::variadic_marker => "`...`",
        Rule::EOI => "end of input",
        _ => "valid declaration syntax",
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
