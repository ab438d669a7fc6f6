//! Named, typed storage slots

use crate::value::Value;

/// One registered value and the type tag conversion rules see for it
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCell {
    name: String,
    value: Value,
    type_tag: String,
}

impl ValueCell {
    /// Create a cell. Without an explicit type tag the value's kind is used.
    pub fn new(name: impl Into<String>, value: Value, type_tag: Option<&str>) -> Self {
        let type_tag = match type_tag {
            Some(tag) => tag.to_string(),
            None => value.kind().as_str().to_string(),
        };
        Self {
            name: name.into(),
            value,
            type_tag,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// A cell holding `Undefined` is unset whatever its type tag says
    pub fn is_unset(&self) -> bool {
        self.value.is_undefined()
    }
}
