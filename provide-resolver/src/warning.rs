//! Non-fatal conditions met while reading declarations

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ResolveWarning {
    #[error("Type tag ignored on variadic parameter `{parameter}`")]
    #[diagnostic(
        code(provide::resolve::variadic_type_tag),
        severity(Warning),
        help("Variadic parameters always resolve with the default type; drop the tag")
    )]
    VariadicTypeTag { parameter: String },
}

impl ResolveWarning {
    /// Log the warning and append it to `sink`
    pub(crate) fn emit(self, sink: &mut Vec<ResolveWarning>) {
        tracing::warn!(warning = %self, "declaration warning");
        sink.push(self);
    }
}
