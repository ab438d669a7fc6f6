//! Resolution context
//!
//! The context owns the value cells and conversion rules that parameters
//! resolve against, and drives the whole pipeline: read a callable's
//! parameters, supply each one, invoke.

use crate::callable::{Callable, CallableDescriptor, ParameterSource, PreparedCall};
use crate::cell::ValueCell;
use crate::conversion::{AdapterRegistration, ConversionRule, Transform};
use crate::descriptor::ParameterDescriptor;
use crate::error::{ResolveError, Result};
use crate::signature::declaration_parameters;
use crate::value::Value;
use crate::warning::ResolveWarning;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Parsing settings shared by every declaration a context reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Separates a parameter name from its type tag, as in `config:json`
    pub type_delimiter: char,
    /// Type tag assumed when a parameter declares none
    pub default_type: String,
}

impl ContextConfig {
    pub const DEFAULT_TYPE_DELIMITER: char = ':';
    pub const DEFAULT_TYPE: &'static str = "*";

    pub fn with_type_delimiter(mut self, delimiter: char) -> Self {
        self.type_delimiter = delimiter;
        self
    }

    pub fn with_default_type(mut self, default_type: impl Into<String>) -> Self {
        self.default_type = default_type.into();
        self
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            type_delimiter: Self::DEFAULT_TYPE_DELIMITER,
            default_type: Self::DEFAULT_TYPE.to_string(),
        }
    }
}

pub struct ResolutionContext {
    config: ContextConfig,

    /// Named values, replaced wholesale on re-registration
    cells: IndexMap<String, ValueCell>,

    /// Conversion rules keyed by output type. Alias lookups scan these in
    /// registration order.
    rules: IndexMap<String, ConversionRule>,

    /// Warnings from every declaration read so far
    warnings: Vec<ResolveWarning>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    /// Create a context whose default-type rule is the identity
    pub fn with_config(config: ContextConfig) -> Self {
        let mut rules = IndexMap::new();
        rules.insert(
            config.default_type.clone(),
            ConversionRule::new(config.default_type.clone()),
        );

        Self {
            config,
            cells: IndexMap::new(),
            rules,
            warnings: Vec::new(),
        }
    }

    /// Register the standard adapters on top of the seeded rules
    pub fn with_standard_adapters(mut self) -> Self {
        crate::builtins::register_standard_adapters(&mut self);
        self
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    // Value Cell Management

    /// Register a value, replacing any cell of the same name
    pub fn add_parameter(&mut self, name: impl Into<String>, value: Value, type_tag: Option<&str>) {
        let name = name.into();
        let cell = ValueCell::new(name.clone(), value, type_tag);
        tracing::trace!(name = %name, type_tag = %cell.type_tag(), "registering value cell");
        self.cells.insert(name, cell);
    }

    /// Register every member of an object value.
    ///
    /// Members that are `Undefined` are skipped. Existing cells not named
    /// in `values` are kept.
    pub fn set_parameters(&mut self, values: Value) -> Result<()> {
        let members = match values {
            Value::Object(members) => members,
            other => {
                return Err(ResolveError::NotAnObject {
                    found: other.type_name().to_string(),
                })
            }
        };

        for (name, value) in members {
            if !value.is_undefined() {
                self.add_parameter(name, value, None);
            }
        }
        Ok(())
    }

    pub fn cell(&self, name: &str) -> Option<&ValueCell> {
        self.cells.get(name)
    }

    pub fn cells(&self) -> impl Iterator<Item = &ValueCell> {
        self.cells.values()
    }

    pub fn clear_parameters(&mut self) {
        self.cells.clear();
    }

    // Conversion Rule Management

    /// Register a rule under its output type, replacing any previous rule
    pub fn add_adapter(&mut self, rule: ConversionRule) {
        tracing::trace!(output_type = %rule.output_type(), alias = ?rule.alias(), "registering conversion rule");
        self.rules.insert(rule.output_type().to_string(), rule);
    }

    /// Register a bare transform as the fallback-only rule for `output_type`
    pub fn add_transform(&mut self, output_type: impl Into<String>, f: Transform) {
        self.add_adapter(ConversionRule::from_transform(output_type, f));
    }

    pub fn set_adapters<K, I>(&mut self, adapters: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AdapterRegistration)>,
    {
        for (output_type, registration) in adapters {
            self.add_adapter(registration.into_rule(output_type));
        }
    }

    /// The rule for `type_name`: an exact output type match first, then the
    /// first rule aliased to it
    pub fn rule_for(&self, type_name: &str) -> Option<&ConversionRule> {
        self.rules
            .get(type_name)
            .or_else(|| self.rules.values().find(|rule| rule.is_aliased_as(type_name)))
    }

    pub fn rules(&self) -> impl Iterator<Item = &ConversionRule> {
        self.rules.values()
    }

    // Warnings

    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<ResolveWarning> {
        std::mem::take(&mut self.warnings)
    }

    // Resolution

    /// Evaluate a parameter declaration string or a function value
    pub fn evaluate(&mut self, target: &Value) -> Result<Value> {
        match target {
            Value::String(declaration) => self.resolve(declaration),
            Value::Function(callable) => self.run(callable),
            other => Err(ResolveError::UnsupportedTarget {
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Read `declaration` as one parameter and supply it
    pub fn resolve(&mut self, declaration: &str) -> Result<Value> {
        let descriptor = ParameterDescriptor::parse(declaration, &self.config, &mut self.warnings)?;
        descriptor.supply(self)
    }

    /// Read a callable's parameters for one evaluation
    pub fn describe(&mut self, callable: &Callable) -> Result<CallableDescriptor> {
        let parameters = match callable.parameters() {
            ParameterSource::Declaration(text) => {
                let mut parameters = Vec::new();
                for raw in declaration_parameters(text)? {
                    parameters.push(ParameterDescriptor::from_raw(
                        &raw,
                        &self.config,
                        &mut self.warnings,
                    )?);
                }
                parameters
            }
            ParameterSource::Explicit(declarations) => declarations
                .iter()
                .map(|declaration| ParameterDescriptor::from_declaration(declaration, &self.config))
                .collect(),
        };

        Ok(CallableDescriptor {
            callable: callable.clone(),
            parameters,
        })
    }

    /// Supply every parameter in declaration order.
    ///
    /// An unresolved trailing variadic parameter is left out entirely. An
    /// unresolved defaulted parameter receives its default. Every other
    /// unresolved parameter is passed as `Undefined`.
    pub fn resolve_arguments(&self, descriptor: &CallableDescriptor) -> Result<Vec<Value>> {
        let trailing_variadic = descriptor.trailing_variadic();
        let mut arguments = Vec::with_capacity(descriptor.arity());

        for (index, parameter) in descriptor.parameters.iter().enumerate() {
            let value = parameter.supply(self)?;
            if !value.is_undefined() {
                arguments.push(value);
                continue;
            }

            if trailing_variadic == Some(index) {
                tracing::debug!(parameter = %parameter.raw_text(), "omitting unresolved variadic parameter");
                continue;
            }

            arguments.push(parameter.default_value().unwrap_or(Value::Undefined));
        }

        Ok(arguments)
    }

    /// Resolve a callable's arguments without invoking it
    pub fn prepare(&mut self, callable: &Callable) -> Result<PreparedCall> {
        let descriptor = self.describe(callable)?;
        let arguments = self.resolve_arguments(&descriptor)?;
        tracing::debug!(
            callable = %callable,
            declared = descriptor.arity(),
            supplied = arguments.len(),
            "prepared callable"
        );
        Ok(PreparedCall {
            callable: descriptor.callable,
            arguments,
        })
    }

    /// Resolve a callable's arguments and invoke it
    pub fn run(&mut self, callable: &Callable) -> Result<Value> {
        Ok(self.prepare(callable)?.invoke())
    }

    /// Get a debug representation of the current state
    pub fn debug_state(&self) -> String {
        format!(
            "ResolutionContext {{\n  cells: {},\n  rules: {},\n  warnings: {},\n}}",
            self.cells.len(),
            self.rules.len(),
            self.warnings.len()
        )
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref SHARED_CONTEXT: Mutex<ResolutionContext> = Mutex::new(ResolutionContext::new());
}

/// Lock the process-wide context.
///
/// A panic while another caller held the lock does not poison it for
/// later callers.
pub fn shared_context() -> MutexGuard<'static, ResolutionContext> {
    SHARED_CONTEXT
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
