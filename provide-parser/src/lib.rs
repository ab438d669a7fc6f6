// Provide Parser Library
// Pest-based parser for callable declarations and parameter text

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::*;

// Re-export parser rule for manual testing
pub use parser::Rule;

/// Parse a callable declaration such as `function f(a, b) { .. }`,
/// `(a, b) => ..` or `a => ..`.
pub fn parse_declaration(input: &str) -> Result<Signature, ParseError> {
    parser::SignatureParser::parse_declaration(input)
}

/// Parse the text of a single parameter (`...rest`, `name:type = 1`).
pub fn parse_parameter(input: &str) -> Result<ParameterSyntax, ParseError> {
    parser::SignatureParser::parse_parameter(input)
}

/// Strip block comments and line breaks from declaration text.
pub fn normalize_declaration(input: &str) -> Result<String, ParseError> {
    parser::SignatureParser::normalize(input)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
