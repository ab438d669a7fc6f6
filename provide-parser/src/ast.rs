// Provide Parser AST
// Parsed shapes of callable declarations and their parameters

use std::fmt;

/// Byte range into the normalized declaration text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// The syntactic style a callable was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationForm {
    /// `function name(a, b) { .. }`, also method style `name(a, b) { .. }`
    Function,
    /// `(a, b) => ..`
    Arrow,
    /// `a => ..`, exactly one unparenthesized parameter
    Shorthand,
}

impl fmt::Display for DeclarationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationForm::Function => write!(f, "function"),
            DeclarationForm::Arrow => write!(f, "arrow"),
            DeclarationForm::Shorthand => write!(f, "shorthand"),
        }
    }
}

/// One comma-separated parameter declaration, as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    pub text: String,
    pub span: Span,
}

/// A parsed callable declaration head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Declaration text after comment stripping and line-break folding.
    /// All spans index into this string.
    pub source: String,
    pub form: DeclarationForm,
    pub name: Option<String>,
    pub is_async: bool,
    pub parameters: Vec<RawParameter>,
    /// Text after the body introducer, if the declaration has a body
    pub body: Option<String>,
    pub span: Span,
}

impl Signature {
    pub fn parameter_texts(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.text.as_str()).collect()
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// Syntax of a single parameter before any type tag is split off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSyntax {
    /// Canonical reassembly of marker, name text and default
    pub raw_text: String,
    /// Name portion, possibly still carrying an embedded type tag
    pub name_text: String,
    pub default_expression: Option<String>,
    pub is_variadic: bool,
}

impl ParameterSyntax {
    pub fn new(name_text: String, default_expression: Option<String>, is_variadic: bool) -> Self {
        let raw_text = Self::canonical_text(&name_text, default_expression.as_deref(), is_variadic);
        Self {
            raw_text,
            name_text,
            default_expression,
            is_variadic,
        }
    }

    pub fn is_default(&self) -> bool {
        self.default_expression.is_some()
    }

    /// `...name = default`, with each piece present only when declared
    pub fn canonical_text(name_text: &str, default_expression: Option<&str>, is_variadic: bool) -> String {
        let mut text = String::new();
        if is_variadic {
            text.push_str("...");
        }
        text.push_str(name_text);
        if let Some(default) = default_expression {
            text.push_str(" = ");
            text.push_str(default);
        }
        text
    }
}

impl fmt::Display for ParameterSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_text)
    }
}
