//! Conversion rules
//!
//! A rule is registered for one output type. It holds transforms keyed by
//! the input cell's type tag and a fallback used for every other input type.
//! A rule may also answer to a second, native alias name.

use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A pure value-to-value conversion
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Wrap a closure as a [`Transform`]
pub fn transform<F>(f: F) -> Transform
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The transform that returns its input unchanged
pub fn identity() -> Transform {
    transform(|value| value)
}

#[derive(Clone)]
pub struct ConversionRule {
    output_type: String,
    per_input_type: IndexMap<String, Transform>,
    fallback: Transform,
    alias: Option<String>,
}

impl ConversionRule {
    /// A rule with no per-input transforms and an identity fallback
    pub fn new(output_type: impl Into<String>) -> Self {
        Self {
            output_type: output_type.into(),
            per_input_type: IndexMap::new(),
            fallback: identity(),
            alias: None,
        }
    }

    /// A rule whose only behaviour is `fallback`
    pub fn from_transform(output_type: impl Into<String>, fallback: Transform) -> Self {
        Self::new(output_type).with_fallback(fallback)
    }

    /// Add a transform for cells whose type tag is `input_type`
    pub fn with_transform(mut self, input_type: impl Into<String>, f: Transform) -> Self {
        self.per_input_type.insert(input_type.into(), f);
        self
    }

    pub fn with_fallback(mut self, fallback: Transform) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn output_type(&self) -> &str {
        &self.output_type
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Input types with a dedicated transform, in registration order
    pub fn input_types(&self) -> impl Iterator<Item = &str> {
        self.per_input_type.keys().map(String::as_str)
    }

    pub fn has_transform_for(&self, input_type: &str) -> bool {
        self.per_input_type.contains_key(input_type)
    }

    /// Whether this rule answers to `type_name` through its alias
    pub fn is_aliased_as(&self, type_name: &str) -> bool {
        self.alias.as_deref() == Some(type_name)
    }

    /// Convert a value whose cell carries `input_type`
    pub fn apply(&self, input_type: &str, value: Value) -> Value {
        match self.per_input_type.get(input_type) {
            Some(specific) => specific(value),
            None => (self.fallback)(value),
        }
    }

    pub(crate) fn retarget(mut self, output_type: impl Into<String>) -> Self {
        self.output_type = output_type.into();
        self
    }
}

impl fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRule")
            .field("output_type", &self.output_type)
            .field("input_types", &self.input_types().collect::<Vec<_>>())
            .field("alias", &self.alias)
            .finish_non_exhaustive()
    }
}

/// What a bulk adapter registration may hold for one output type
#[derive(Clone)]
pub enum AdapterRegistration {
    Rule(ConversionRule),
    Transform(Transform),
}

impl AdapterRegistration {
    /// Canonicalize into a rule registered under `output_type`
    pub fn into_rule(self, output_type: impl Into<String>) -> ConversionRule {
        match self {
            AdapterRegistration::Rule(rule) => rule.retarget(output_type),
            AdapterRegistration::Transform(f) => ConversionRule::from_transform(output_type, f),
        }
    }
}

impl From<ConversionRule> for AdapterRegistration {
    fn from(rule: ConversionRule) -> Self {
        AdapterRegistration::Rule(rule)
    }
}

impl From<Transform> for AdapterRegistration {
    fn from(f: Transform) -> Self {
        AdapterRegistration::Transform(f)
    }
}
