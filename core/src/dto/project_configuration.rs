use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat parameter of the project/training configuration API, keyed by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationParameterDTO {
    pub key: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub value: Value,
    pub default_value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingConstraintsDTO {
    #[serde(default)]
    pub constraints: Vec<ConfigurationParameterDTO>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfigDTO {
    pub task_id: String,
    #[serde(default)]
    pub training: TrainingConstraintsDTO,
    #[serde(default)]
    pub auto_training: Vec<ConfigurationParameterDTO>,
    #[serde(default)]
    pub predictions: Vec<ConfigurationParameterDTO>,
}

/// Response of `GET {project}/project_configuration`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfigurationDTO {
    #[serde(default)]
    pub task_configs: Vec<TaskConfigDTO>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueParameterDTO {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingConstraintsUploadDTO {
    pub constraints: Vec<KeyValueParameterDTO>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfigUploadDTO {
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingConstraintsUploadDTO>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_training: Option<Vec<KeyValueParameterDTO>>,
}

/// Body of `PATCH {project}/project_configuration`: keys and values only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfigurationUploadPayloadDTO {
    pub task_configs: Vec<TaskConfigUploadDTO>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_project_configuration() {
        let dto: ProjectConfigurationDTO = serde_json::from_str(
            r#"{
                "task_configs": [{
                    "task_id": "t1",
                    "training": {"constraints": [
                        {"key":"min_images_per_label","type":"int","name":"Minimum images","description":"","value":12,"default_value":12,"min_value":3,"max_value":100}
                    ]},
                    "auto_training": [
                        {"key":"enable","type":"bool","name":"Enable auto training","description":"","value":false,"default_value":false}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let task = &dto.task_configs[0];
        assert_eq!(task.training.constraints[0].parameter_type, "int");
        assert_eq!(task.auto_training[0].key, "enable");
        assert!(task.predictions.is_empty());
    }

    #[test]
    fn test_upload_skips_absent_sections() {
        let payload = ProjectConfigurationUploadPayloadDTO {
            task_configs: vec![TaskConfigUploadDTO {
                task_id: "t1".to_string(),
                training: None,
                auto_training: Some(vec![KeyValueParameterDTO {
                    key: "enable".to_string(),
                    value: Value::Bool(true),
                }]),
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["task_configs"][0].get("training").is_none());
        assert_eq!(json["task_configs"][0]["auto_training"][0]["value"], true);
    }
}
