use serde::{Deserialize, Serialize};

use super::project_configuration::{ConfigurationParameterDTO, KeyValueParameterDTO};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreparationDTO {
    #[serde(default)]
    pub subset_split: Vec<ConfigurationParameterDTO>,
    #[serde(default)]
    pub filtering: Vec<ConfigurationParameterDTO>,
    #[serde(default)]
    pub augmentation: Vec<ConfigurationParameterDTO>,
}

/// Response of `GET {project}/training_configuration`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfigurationDTO {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_manifest_id: Option<String>,
    #[serde(default)]
    pub dataset_preparation: DatasetPreparationDTO,
    #[serde(default)]
    pub training: Vec<ConfigurationParameterDTO>,
    #[serde(default)]
    pub evaluation: Vec<ConfigurationParameterDTO>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreparationUploadDTO {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subset_split: Option<Vec<KeyValueParameterDTO>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtering: Option<Vec<KeyValueParameterDTO>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augmentation: Option<Vec<KeyValueParameterDTO>>,
}

/// Body of `PATCH {project}/training_configuration`: keys and values only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfigurationUploadPayloadDTO {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_manifest_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_preparation: Option<DatasetPreparationUploadDTO>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<Vec<KeyValueParameterDTO>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Vec<KeyValueParameterDTO>>,
}
