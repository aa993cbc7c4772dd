use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dto::{ConfigurationParameterDTO, KeyValueParameterDTO};
use crate::error::MappingError;
use crate::parameters::ParameterValue;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConfigurationParameterKind {
    #[serde(rename_all = "camelCase")]
    Int {
        value: i64,
        default_value: i64,
        min_value: Option<i64>,
        max_value: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Float {
        value: f64,
        default_value: f64,
        min_value: Option<f64>,
        max_value: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Bool { value: bool, default_value: bool },
    #[serde(rename_all = "camelCase")]
    Enum {
        value: String,
        default_value: String,
        allowed_values: Vec<String>,
    },
}

/// One entry of a flat configuration list, addressed by `key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationParameter {
    pub key: String,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: ConfigurationParameterKind,
}

impl ConfigurationParameter {
    pub fn value(&self) -> ParameterValue {
        match &self.kind {
            ConfigurationParameterKind::Int { value, .. } => ParameterValue::Integer(*value),
            ConfigurationParameterKind::Float { value, .. } => ParameterValue::Float(*value),
            ConfigurationParameterKind::Bool { value, .. } => ParameterValue::Boolean(*value),
            ConfigurationParameterKind::Enum { value, .. } => ParameterValue::String(value.clone()),
        }
    }

    pub fn default_value(&self) -> ParameterValue {
        match &self.kind {
            ConfigurationParameterKind::Int { default_value, .. } => {
                ParameterValue::Integer(*default_value)
            }
            ConfigurationParameterKind::Float { default_value, .. } => {
                ParameterValue::Float(*default_value)
            }
            ConfigurationParameterKind::Bool { default_value, .. } => {
                ParameterValue::Boolean(*default_value)
            }
            ConfigurationParameterKind::Enum { default_value, .. } => {
                ParameterValue::String(default_value.clone())
            }
        }
    }

    pub fn is_default(&self) -> bool {
        self.value() == self.default_value()
    }

    /// Copy of `self` holding `value`, or `None` when the type does not fit.
    pub fn with_value(&self, value: &ParameterValue) -> Option<Self> {
        let mut next = self.clone();
        let applied = match &mut next.kind {
            ConfigurationParameterKind::Int { value: v, .. } => value.as_i64().map(|i| *v = i),
            ConfigurationParameterKind::Float { value: v, .. } => value.as_f64().map(|f| *v = f),
            ConfigurationParameterKind::Bool { value: v, .. } => value.as_bool().map(|b| *v = b),
            ConfigurationParameterKind::Enum { value: v, .. } => {
                value.as_str().map(|s| *v = s.to_string())
            }
        };
        applied.map(|_| next)
    }

    pub fn as_key_value(&self) -> KeyValueParameter {
        KeyValueParameter {
            key: self.key.clone(),
            value: self.value(),
        }
    }
}

/// A `key`/`value` pair: the only thing sent back to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueParameter {
    pub key: String,
    pub value: ParameterValue,
}

impl KeyValueParameter {
    pub fn new(key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<&KeyValueParameter> for KeyValueParameterDTO {
    fn from(param: &KeyValueParameter) -> Self {
        Self {
            key: param.key.clone(),
            value: param.value.to_json(),
        }
    }
}

fn mismatch(key: &str, field: &'static str, expected: &'static str, found: &Value) -> MappingError {
    MappingError::ValueTypeMismatch {
        name: key.to_string(),
        field,
        expected,
        found: found.to_string(),
    }
}

fn as_i64(key: &str, field: &'static str, value: &Value) -> Result<i64, MappingError> {
    value
        .as_i64()
        .ok_or_else(|| mismatch(key, field, "integer", value))
}

fn as_f64(key: &str, field: &'static str, value: &Value) -> Result<f64, MappingError> {
    value
        .as_f64()
        .ok_or_else(|| mismatch(key, field, "float", value))
}

fn as_bool(key: &str, field: &'static str, value: &Value) -> Result<bool, MappingError> {
    value
        .as_bool()
        .ok_or_else(|| mismatch(key, field, "boolean", value))
}

fn as_string(key: &str, field: &'static str, value: &Value) -> Result<String, MappingError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(key, field, "string", value))
}

/// Maps a flat parameter, dispatching on `type ∈ {int, float, bool, enum}`.
pub fn get_parameter(dto: ConfigurationParameterDTO) -> Result<ConfigurationParameter, MappingError> {
    let key = dto.key.as_str();
    let kind = match dto.parameter_type.as_str() {
        "int" => ConfigurationParameterKind::Int {
            value: as_i64(key, "value", &dto.value)?,
            default_value: as_i64(key, "default_value", &dto.default_value)?,
            min_value: dto
                .min_value
                .as_ref()
                .map(|v| as_i64(key, "min_value", v))
                .transpose()?,
            max_value: dto
                .max_value
                .as_ref()
                .map(|v| as_i64(key, "max_value", v))
                .transpose()?,
        },
        "float" => ConfigurationParameterKind::Float {
            value: as_f64(key, "value", &dto.value)?,
            default_value: as_f64(key, "default_value", &dto.default_value)?,
            min_value: dto
                .min_value
                .as_ref()
                .map(|v| as_f64(key, "min_value", v))
                .transpose()?,
            max_value: dto
                .max_value
                .as_ref()
                .map(|v| as_f64(key, "max_value", v))
                .transpose()?,
        },
        "bool" => ConfigurationParameterKind::Bool {
            value: as_bool(key, "value", &dto.value)?,
            default_value: as_bool(key, "default_value", &dto.default_value)?,
        },
        "enum" => ConfigurationParameterKind::Enum {
            value: as_string(key, "value", &dto.value)?,
            default_value: as_string(key, "default_value", &dto.default_value)?,
            allowed_values: dto
                .allowed_values
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|v| as_string(key, "allowed_values", v))
                .collect::<Result<Vec<_>, _>>()?,
        },
        other => {
            return Err(MappingError::UnsupportedParameterType {
                key: dto.key.clone(),
                parameter_type: other.to_string(),
            })
        }
    };

    Ok(ConfigurationParameter {
        key: dto.key,
        name: dto.name,
        description: dto.description,
        kind,
    })
}

pub(crate) fn get_parameters(
    dtos: Vec<ConfigurationParameterDTO>,
) -> Result<Vec<ConfigurationParameter>, MappingError> {
    dtos.into_iter().map(get_parameter).collect()
}

/// Replaces the value of every parameter whose key appears in `updates`.
///
/// Order and unmatched entries are kept; unknown keys and values of the
/// wrong type are ignored.
pub fn get_updated_parameters(
    parameters: &[ConfigurationParameter],
    updates: &[KeyValueParameter],
) -> Vec<ConfigurationParameter> {
    parameters
        .iter()
        .map(|param| {
            updates
                .iter()
                .find(|update| update.key == param.key)
                .and_then(|update| param.with_value(&update.value))
                .unwrap_or_else(|| param.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn dto(value: Value) -> ConfigurationParameterDTO {
        serde_json::from_value(value).unwrap()
    }

    fn enable_param() -> ConfigurationParameter {
        get_parameter(dto(json!({
            "key": "enable", "type": "bool", "value": false, "default_value": false,
            "name": "Enable auto training", "description": ""
        })))
        .unwrap()
    }

    fn int_param(key: &str, value: i64) -> ConfigurationParameter {
        ConfigurationParameter {
            key: key.to_string(),
            name: key.to_uppercase(),
            description: String::new(),
            kind: ConfigurationParameterKind::Int {
                value,
                default_value: value,
                min_value: None,
                max_value: None,
            },
        }
    }

    #[test]
    fn test_enable_auto_training_scenario() {
        let before = enable_param();
        let after = get_updated_parameters(
            std::slice::from_ref(&before),
            &[KeyValueParameter::new("enable", true)],
        );
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].value(), ParameterValue::Boolean(true));
        assert_eq!(after[0].key, before.key);
        assert_eq!(after[0].name, "Enable auto training");
        assert_eq!(after[0].description, "");
        assert_eq!(after[0].default_value(), ParameterValue::Boolean(false));
    }

    #[test]
    fn test_flat_update_keeps_order_and_others() {
        let params = vec![int_param("a", 1), int_param("b", 2)];
        let next = get_updated_parameters(&params, &[KeyValueParameter::new("a", 10i64)]);
        assert_eq!(next[0].key, "a");
        assert_eq!(next[0].value(), ParameterValue::Integer(10));
        assert_eq!(next[1], params[1]);
    }

    #[test]
    fn test_flat_update_ignores_wrong_type() {
        let params = vec![int_param("a", 1)];
        let next = get_updated_parameters(&params, &[KeyValueParameter::new("a", "x")]);
        assert_eq!(next, params);
    }

    #[test]
    fn test_enum_and_float_mapping() {
        let param = get_parameter(dto(json!({
            "key": "mode", "type": "enum", "value": "fast", "default_value": "balanced",
            "allowed_values": ["fast", "balanced", "accurate"]
        })))
        .unwrap();
        assert!(matches!(
            param.kind,
            ConfigurationParameterKind::Enum { ref allowed_values, .. } if allowed_values.len() == 3
        ));
        assert!(!param.is_default());

        let param = get_parameter(dto(json!({
            "key": "ratio", "type": "float", "value": 0.5, "default_value": 1, "min_value": 0
        })))
        .unwrap();
        assert_eq!(param.default_value(), ParameterValue::Float(1.0));
        assert!(matches!(
            param.kind,
            ConfigurationParameterKind::Float { min_value: Some(_), max_value: None, .. }
        ));
    }

    #[test]
    fn test_unknown_type_not_supported() {
        let err = get_parameter(dto(json!({
            "key": "x", "type": "list", "value": [], "default_value": []
        })))
        .unwrap_err();
        assert_eq!(
            err,
            MappingError::UnsupportedParameterType {
                key: "x".to_string(),
                parameter_type: "list".to_string()
            }
        );
        assert!(err.to_string().contains("not supported"));
    }

    proptest! {
        #[test]
        fn prop_flat_update_touches_only_matching_key(
            values in proptest::collection::vec(any::<i64>(), 1..16),
            target in any::<prop::sample::Index>(),
            new_value in any::<i64>(),
        ) {
            let params: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, v)| int_param(&format!("k{i}"), *v))
                .collect();
            let target = target.index(params.len());
            let update = KeyValueParameter::new(format!("k{target}"), new_value);
            let next = get_updated_parameters(&params, &[update]);

            prop_assert_eq!(next.len(), params.len());
            for (i, (before, after)) in params.iter().zip(next.iter()).enumerate() {
                prop_assert_eq!(&before.key, &after.key);
                if i == target {
                    prop_assert_eq!(after.value(), ParameterValue::Integer(new_value));
                } else {
                    prop_assert_eq!(before, after);
                }
            }
        }
    }
}
