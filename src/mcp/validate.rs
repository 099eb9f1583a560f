//! Argument validation
//!
//! Turns raw tool arguments into [`NormalizedArgs`] using the field table of
//! a [`ToolSpec`]: defaults are filled in, numbers are clamped into range and
//! required text must be present. Fields the tool does not document are
//! ignored.

use serde_json::Value;

use crate::error::ValidationError;
use crate::mcp::catalog::{FieldKind, ToolSpec};

/// A resolved argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Integer(i64),
    Text(String),
}

/// Arguments after defaults and clamping, in field-table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    values: Vec<(&'static str, ArgValue)>,
}

impl NormalizedArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(ArgValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(ArgValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validate and normalize raw arguments for `tool`
pub fn normalize(tool: &ToolSpec, raw: &Value) -> Result<NormalizedArgs, ValidationError> {
    let provided = match raw {
        Value::Null => None,
        Value::Object(map) => Some(map),
        _ => return Err(ValidationError::NotAnObject),
    };

    let mut values = Vec::with_capacity(tool.fields.len());

    for field in tool.fields {
        let value = provided
            .and_then(|map| map.get(field.name))
            .filter(|v| !v.is_null());

        match field.kind {
            FieldKind::Integer { default, min, max } => {
                let n = match value {
                    Some(v) => coerce_integer(v).ok_or_else(|| ValidationError::InvalidParameter {
                        field: field.name.to_string(),
                        reason: "expected a number".to_string(),
                    })?,
                    None => default,
                };
                values.push((field.name, ArgValue::Integer(n.clamp(min, max))));
            }
            FieldKind::Text { required, .. } => {
                let text = match value {
                    Some(Value::String(s)) => Some(s.trim()).filter(|s| !s.is_empty()),
                    Some(_) => {
                        return Err(ValidationError::InvalidParameter {
                            field: field.name.to_string(),
                            reason: "expected a string".to_string(),
                        })
                    }
                    None => None,
                };

                match text {
                    Some(text) => values.push((field.name, ArgValue::Text(text.to_string()))),
                    None if required => {
                        return Err(ValidationError::MissingField {
                            field: field.name.to_string(),
                        })
                    }
                    None => {}
                }
            }
        }
    }

    Ok(NormalizedArgs { values })
}

/// Accept integers, finite floats (truncated) and numeric strings
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}
