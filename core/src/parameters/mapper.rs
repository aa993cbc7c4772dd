use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::path::ParameterPath;
use super::types::{
    ConfigurableParametersComponents, ConfigurableParametersGroups, ConfigurableParametersParams,
    ConfigurableParametersTaskChain, ConfigurableParametersTree, DataType, EntityIdentifier,
    ParameterKind, GLOBAL_TASK_ID, GLOBAL_TASK_TITLE,
};
use super::value::ParameterValue;
use crate::dto::{
    ConfigurableParametersComponentsDTO, ConfigurableParametersDTO,
    ConfigurableParametersGroupsDTO, ConfigurableParametersParamsDTO,
    ConfigurableParametersTaskChainDTO, ModelConfigurationDTO,
};
use crate::error::MappingError;

fn random_id() -> String {
    Uuid::new_v4().to_string()
}

/// Maps the project configuration: the `global` components first, then one
/// entry per task of the chain.
pub fn get_config_parameters_entity(
    dto: ConfigurableParametersDTO,
) -> Result<ConfigurableParametersTree, MappingError> {
    let global = ConfigurableParametersTaskChainDTO {
        task_id: GLOBAL_TASK_ID.to_string(),
        task_title: GLOBAL_TASK_TITLE.to_string(),
        components: dto.global,
    };

    let mut tree = Vec::with_capacity(dto.task_chain.len() + 1);
    tree.push(Arc::new(get_task_chain_entity(global)?));
    for task in dto.task_chain {
        tree.push(Arc::new(get_task_chain_entity(task)?));
    }

    tracing::debug!(
        target: "trainconf.mapper",
        stage = "mapper.config_parameters.out",
        tasks = tree.len()
    );
    Ok(tree)
}

/// Maps the hyper-parameter configuration of a single model.
pub fn get_model_config_entity(
    dto: ModelConfigurationDTO,
) -> Result<ConfigurableParametersTaskChain, MappingError> {
    get_task_chain_entity(ConfigurableParametersTaskChainDTO {
        task_id: dto.task_id,
        task_title: dto.task_title,
        components: dto.components,
    })
}

pub fn get_task_chain_entity(
    dto: ConfigurableParametersTaskChainDTO,
) -> Result<ConfigurableParametersTaskChain, MappingError> {
    let components = dto
        .components
        .into_iter()
        .map(|component| get_component_entity(&dto.task_id, component).map(Arc::new))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConfigurableParametersTaskChain {
        task_id: dto.task_id,
        task_title: dto.task_title,
        components,
    })
}

fn get_component_entity(
    task_id: &str,
    dto: ConfigurableParametersComponentsDTO,
) -> Result<ConfigurableParametersComponents, MappingError> {
    let groups = dto
        .groups
        .map(|groups| {
            groups
                .into_iter()
                .map(|group| get_group_entity(task_id, &dto.id, group).map(Arc::new))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let parameters = dto
        .parameters
        .map(|parameters| {
            parameters
                .into_iter()
                .map(|parameter| {
                    let path = ParameterPath::flat(task_id, dto.id.as_str(), random_id());
                    get_configurable_parameter(path, parameter).map(Arc::new)
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(ConfigurableParametersComponents {
        id: dto.id,
        header: dto.header,
        description: dto.description,
        entity_identifier: EntityIdentifier::from(dto.entity_identifier),
        groups,
        parameters,
    })
}

fn get_group_entity(
    task_id: &str,
    component_id: &str,
    dto: ConfigurableParametersGroupsDTO,
) -> Result<ConfigurableParametersGroups, MappingError> {
    let group_id = random_id();
    let parameters = dto
        .parameters
        .into_iter()
        .map(|parameter| {
            let path =
                ParameterPath::grouped(task_id, component_id, group_id.as_str(), random_id());
            get_configurable_parameter(path, parameter).map(Arc::new)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConfigurableParametersGroups {
        id: group_id,
        name: dto.name,
        header: dto.header,
        description: dto.description,
        parameters,
    })
}

/// Maps one leaf parameter onto its variant.
///
/// Booleans are recognised by `data_type` alone. Otherwise `template_type`
/// decides: `selectable` (any data type) or `input` (integer or float, bounds
/// optional). Any other template type is rejected.
pub fn get_configurable_parameter(
    id: ParameterPath,
    dto: ConfigurableParametersParamsDTO,
) -> Result<ConfigurableParametersParams, MappingError> {
    let name = dto.name.as_str();

    let kind = if dto.data_type == "boolean" {
        ParameterKind::Boolean {
            value: expect_bool(name, "value", &dto.value)?,
            default_value: expect_bool(name, "default_value", &dto.default_value)?,
        }
    } else {
        match dto.template_type.as_str() {
            "selectable" => {
                let data_type = match dto.data_type.as_str() {
                    "integer" => DataType::Integer,
                    "float" => DataType::Float,
                    "string" => DataType::String,
                    other => return Err(unsupported_data_type(&dto, other)),
                };
                let options = dto
                    .options
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|option| expect_typed(name, "options", data_type, option))
                    .collect::<Result<Vec<_>, _>>()?;
                ParameterKind::Selectable {
                    data_type,
                    value: expect_typed(name, "value", data_type, &dto.value)?,
                    default_value: expect_typed(
                        name,
                        "default_value",
                        data_type,
                        &dto.default_value,
                    )?,
                    options,
                }
            }
            "input" => match dto.data_type.as_str() {
                "integer" => ParameterKind::Integer {
                    value: expect_i64(name, "value", &dto.value)?,
                    default_value: expect_i64(name, "default_value", &dto.default_value)?,
                    min_value: bound_i64(name, "min_value", dto.min_value.as_ref())?,
                    max_value: bound_i64(name, "max_value", dto.max_value.as_ref())?,
                },
                "float" => ParameterKind::Float {
                    value: expect_f64(name, "value", &dto.value)?,
                    default_value: expect_f64(name, "default_value", &dto.default_value)?,
                    min_value: bound_f64(name, "min_value", dto.min_value.as_ref())?,
                    max_value: bound_f64(name, "max_value", dto.max_value.as_ref())?,
                },
                other => return Err(unsupported_data_type(&dto, other)),
            },
            other => {
                tracing::warn!(
                    target: "trainconf.mapper",
                    parameter = %name,
                    template_type = %other,
                    "unsupported template type"
                );
                return Err(MappingError::UnsupportedTemplateType {
                    name: dto.name.clone(),
                    template_type: other.to_string(),
                });
            }
        }
    };

    Ok(ConfigurableParametersParams {
        id,
        name: dto.name,
        header: dto.header,
        description: dto.description,
        warning: dto.warning,
        editable: dto.editable,
        kind,
    })
}

fn unsupported_data_type(dto: &ConfigurableParametersParamsDTO, data_type: &str) -> MappingError {
    MappingError::UnsupportedDataType {
        name: dto.name.clone(),
        data_type: data_type.to_string(),
        template_type: dto.template_type.clone(),
    }
}

fn mismatch(name: &str, field: &'static str, expected: &'static str, found: &Value) -> MappingError {
    MappingError::ValueTypeMismatch {
        name: name.to_string(),
        field,
        expected,
        found: found.to_string(),
    }
}

fn expect_bool(name: &str, field: &'static str, value: &Value) -> Result<bool, MappingError> {
    value
        .as_bool()
        .ok_or_else(|| mismatch(name, field, "boolean", value))
}

fn expect_i64(name: &str, field: &'static str, value: &Value) -> Result<i64, MappingError> {
    value
        .as_i64()
        .ok_or_else(|| mismatch(name, field, "integer", value))
}

fn expect_f64(name: &str, field: &'static str, value: &Value) -> Result<f64, MappingError> {
    value
        .as_f64()
        .ok_or_else(|| mismatch(name, field, "float", value))
}

/// Bounds are optional on the wire; a present bound must still be numeric.
fn bound_i64(
    name: &str,
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<i64>, MappingError> {
    value
        .filter(|v| !v.is_null())
        .map(|v| expect_i64(name, field, v))
        .transpose()
}

fn bound_f64(
    name: &str,
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<f64>, MappingError> {
    value
        .filter(|v| !v.is_null())
        .map(|v| expect_f64(name, field, v))
        .transpose()
}

fn expect_typed(
    name: &str,
    field: &'static str,
    data_type: DataType,
    value: &Value,
) -> Result<ParameterValue, MappingError> {
    match data_type {
        DataType::Boolean => expect_bool(name, field, value).map(ParameterValue::Boolean),
        DataType::Integer => expect_i64(name, field, value).map(ParameterValue::Integer),
        DataType::Float => expect_f64(name, field, value).map(ParameterValue::Float),
        DataType::String => value
            .as_str()
            .map(|s| ParameterValue::String(s.to_string()))
            .ok_or_else(|| mismatch(name, field, "string", value)),
    }
}
