//! Parameter descriptors
//!
//! A descriptor records one parameter of a callable: its name, the type tag
//! that selects a conversion rule, and whether it is defaulted or variadic.
//! Descriptors come either from parameter text (`name:type = 1`,
//! `...rest`) or from an explicit [`ParameterDeclaration`].

use crate::context::{ContextConfig, ResolutionContext};
use crate::error::{ResolveError, Result};
use crate::value::Value;
use crate::warning::ResolveWarning;
use provide_parser::{split_type_tag, ParameterSyntax, RawParameter, Span};
use std::fmt;
use std::sync::Arc;

/// Produces a parameter's default value each time it is asked for
pub type DefaultThunk = Arc<dyn Fn() -> Value + Send + Sync>;

/// An explicitly declared parameter, the alternative to declaration text
#[derive(Clone)]
pub struct ParameterDeclaration {
    name: String,
    type_tag: Option<String>,
    default: Option<DefaultThunk>,
    is_variadic: bool,
}

impl ParameterDeclaration {
    /// A parameter of the default type
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: None,
            default: None,
            is_variadic: false,
        }
    }

    pub fn typed(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: Some(type_tag.into()),
            ..Self::named(name)
        }
    }

    /// A variadic parameter; these never carry a type tag
    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            is_variadic: true,
            ..Self::named(name)
        }
    }

    pub fn with_default<F>(mut self, default: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(default));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    pub fn is_variadic(&self) -> bool {
        self.is_variadic
    }

    /// The declaration written out as parameter text
    pub fn to_text(&self, delimiter: char) -> String {
        let name_text = match &self.type_tag {
            Some(tag) => format!("{}{}{}", self.name, delimiter, tag),
            None => self.name.clone(),
        };
        let default = self.default.as_ref().map(|_| "<closure>");
        ParameterSyntax::canonical_text(&name_text, default, self.is_variadic)
    }
}

impl fmt::Debug for ParameterDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDeclaration")
            .field("name", &self.name)
            .field("type_tag", &self.type_tag)
            .field("has_default", &self.default.is_some())
            .field("is_variadic", &self.is_variadic)
            .finish()
    }
}

#[derive(Clone)]
pub struct ParameterDescriptor {
    raw_text: String,
    name: String,
    declared_type: String,
    is_default: bool,
    is_variadic: bool,
    default_expression: Option<String>,
    default_thunk: Option<DefaultThunk>,
    span: Option<Span>,
}

impl ParameterDescriptor {
    /// Read one parameter's text.
    ///
    /// The type tag follows the last delimiter in the name. On a variadic
    /// parameter the tag is split off and discarded, and a warning is pushed
    /// to `warnings`.
    pub fn parse(
        text: &str,
        config: &ContextConfig,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Result<Self> {
        let syntax = provide_parser::parse_parameter(text)
            .map_err(|error| ResolveError::malformed_declaration(text, error))?;

        let (name, tag) = split_type_tag(&syntax.name_text, config.type_delimiter);
        let declared_type = if syntax.is_variadic {
            if syntax.name_text.contains(config.type_delimiter) {
                ResolveWarning::VariadicTypeTag {
                    parameter: syntax.raw_text.clone(),
                }
                .emit(warnings);
            }
            config.default_type.clone()
        } else {
            tag.unwrap_or_else(|| config.default_type.clone())
        };

        Ok(Self {
            is_default: syntax.is_default(),
            is_variadic: syntax.is_variadic,
            raw_text: syntax.raw_text,
            name,
            declared_type,
            default_expression: syntax.default_expression,
            default_thunk: None,
            span: None,
        })
    }

    /// Read a parameter located by the signature parser, keeping its span
    pub fn from_raw(
        raw: &RawParameter,
        config: &ContextConfig,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Result<Self> {
        let mut descriptor = Self::parse(&raw.text, config, warnings)?;
        descriptor.span = Some(raw.span);
        Ok(descriptor)
    }

    pub fn from_declaration(declaration: &ParameterDeclaration, config: &ContextConfig) -> Self {
        Self {
            raw_text: declaration.to_text(config.type_delimiter),
            name: declaration.name.clone(),
            declared_type: declaration
                .type_tag
                .clone()
                .unwrap_or_else(|| config.default_type.clone()),
            is_default: declaration.default.is_some(),
            is_variadic: declaration.is_variadic,
            default_expression: None,
            default_thunk: declaration.default.clone(),
            span: None,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn is_variadic(&self) -> bool {
        self.is_variadic
    }

    pub fn default_expression(&self) -> Option<&str> {
        self.default_expression.as_deref()
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Materialize the default value.
    ///
    /// Evaluated afresh on every call and never otherwise. Expression text
    /// is read as a literal; text that is not one yields `Undefined`.
    pub fn default_value(&self) -> Option<Value> {
        if let Some(thunk) = &self.default_thunk {
            return Some(thunk());
        }

        let expression = self.default_expression.as_deref()?;
        match Value::parse_literal(expression) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(
                    parameter = %self.raw_text,
                    error = %error,
                    "default expression is not a literal, using undefined"
                );
                Some(Value::Undefined)
            }
        }
    }

    /// Produce this parameter's argument from the context.
    ///
    /// A missing or unset cell yields `Undefined` before any rule is
    /// consulted. Otherwise the rule for the declared type (or the first
    /// rule aliased to it) converts the cell's value.
    pub fn supply(&self, context: &ResolutionContext) -> Result<Value> {
        let cell = match context.cell(&self.name) {
            Some(cell) if !cell.is_unset() => cell,
            _ => return Ok(Value::Undefined),
        };

        let rule = context
            .rule_for(&self.declared_type)
            .ok_or_else(|| ResolveError::no_conversion_rule(&self.declared_type, &self.raw_text))?;

        Ok(rule.apply(cell.type_tag(), cell.value().clone()))
    }
}

impl fmt::Debug for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDescriptor")
            .field("raw_text", &self.raw_text)
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("is_default", &self.is_default)
            .field("is_variadic", &self.is_variadic)
            .field("default_expression", &self.default_expression)
            .finish()
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_text)
    }
}
