use serde::{Deserialize, Serialize};

/// What a configurable component configures, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntityIdentifierDTO {
    #[serde(rename = "HYPER_PARAMETER_GROUP")]
    HyperParameterGroup {
        model_storage_id: String,
        workspace_id: String,
        group_name: String,
    },
    #[serde(rename = "HYPER_PARAMETERS")]
    HyperParameters {
        model_storage_id: String,
        workspace_id: String,
    },
    #[serde(rename = "COMPONENT_PARAMETERS")]
    ComponentParameters {
        workspace_id: String,
        project_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        task_id: Option<String>,
        component: String,
    },
}
