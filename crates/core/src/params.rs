use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// The only parameter key a scaling group probe recognizes.
pub const NAME_PARAM: &str = "name";

/// Identifying parameters for a single Auto Scaling group probe.
///
/// The only recognized option is `name`. Use [`ProbeParams::new`] for typed
/// construction or [`ProbeParams::from_value`] when the parameters arrive as
/// loosely-typed data (a profile file, a JSON request body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeParams {
    /// Name of the Auto Scaling group to probe.
    pub name: String,
}

impl ProbeParams {
    /// Build parameters from a name, rejecting the empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self { name })
    }

    /// Validate loosely-typed parameters.
    ///
    /// Accepts either a mapping with exactly the `name` key, or a bare string
    /// which is taken as the name. A `null` name counts as missing.
    pub fn from_value(raw: &Value) -> Result<Self, ValidationError> {
        match raw {
            Value::String(name) => Self::new(name.as_str()),
            Value::Object(map) => {
                if let Some(unknown) = map.keys().find(|k| k.as_str() != NAME_PARAM) {
                    return Err(ValidationError::UnrecognizedParameter(unknown.clone()));
                }
                match map.get(NAME_PARAM) {
                    None | Some(Value::Null) => Err(ValidationError::MissingName),
                    Some(Value::String(name)) => Self::new(name.as_str()),
                    Some(_) => Err(ValidationError::InvalidType {
                        param: NAME_PARAM.to_owned(),
                        expected: "string",
                    }),
                }
            }
            Value::Null => Err(ValidationError::MissingName),
            Value::Bool(_) => Err(ValidationError::NotAMapping("a boolean")),
            Value::Number(_) => Err(ValidationError::NotAMapping("a number")),
            Value::Array(_) => Err(ValidationError::NotAMapping("an array")),
        }
    }
}
