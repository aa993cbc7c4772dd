use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity_identifier::EntityIdentifierDTO;

fn default_editable() -> bool {
    true
}

/// One leaf parameter of the legacy configurable-parameters API.
///
/// `data_type` and `template_type` are kept as raw strings: the mapper is the
/// single place that decides which combinations are supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurableParametersParamsDTO {
    pub name: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default = "default_editable")]
    pub editable: bool,
    pub data_type: String,
    pub template_type: String,
    pub value: Value,
    pub default_value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_rules: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurableParametersGroupsDTO {
    pub name: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ConfigurableParametersParamsDTO>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurableParametersComponentsDTO {
    pub id: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub description: String,
    pub entity_identifier: EntityIdentifierDTO,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<ConfigurableParametersGroupsDTO>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ConfigurableParametersParamsDTO>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurableParametersTaskChainDTO {
    pub task_id: String,
    #[serde(default)]
    pub task_title: String,
    #[serde(default)]
    pub components: Vec<ConfigurableParametersComponentsDTO>,
}

/// Response of `GET {project}/configuration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurableParametersDTO {
    #[serde(default)]
    pub global: Vec<ConfigurableParametersComponentsDTO>,
    #[serde(default)]
    pub task_chain: Vec<ConfigurableParametersTaskChainDTO>,
}

/// Response of the model configuration endpoint (hyper parameters of one model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfigurationDTO {
    pub task_id: String,
    #[serde(default)]
    pub task_title: String,
    #[serde(default)]
    pub components: Vec<ConfigurableParametersComponentsDTO>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconfigureParameterDTO {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconfigureGroupDTO {
    pub name: String,
    pub parameters: Vec<ReconfigureParameterDTO>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconfigureComponentDTO {
    pub entity_identifier: EntityIdentifierDTO,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ReconfigureGroupDTO>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ReconfigureParameterDTO>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconfigureTaskChainDTO {
    pub task_id: String,
    pub components: Vec<ReconfigureComponentDTO>,
}

/// Body of `POST {project}/configuration`: names and values only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurableParametersReconfigureDTO {
    pub global: Vec<ReconfigureComponentDTO>,
    pub task_chain: Vec<ReconfigureTaskChainDTO>,
}
