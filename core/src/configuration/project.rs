use serde::Serialize;

use super::parameter::{
    get_parameters, get_updated_parameters, ConfigurationParameter, KeyValueParameter,
};
use crate::dto::{
    KeyValueParameterDTO, ProjectConfigurationDTO, ProjectConfigurationUploadPayloadDTO,
    TaskConfigDTO, TaskConfigUploadDTO, TrainingConstraintsUploadDTO,
};
use crate::error::MappingError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    pub task_id: String,
    pub training_constraints: Vec<ConfigurationParameter>,
    pub auto_training: Vec<ConfigurationParameter>,
    pub predictions: Vec<ConfigurationParameter>,
}

impl TaskConfig {
    /// Value of the `enable` auto-training switch, when the task has one.
    pub fn auto_training_enabled(&self) -> Option<bool> {
        self.auto_training
            .iter()
            .find(|param| param.key == "enable")
            .and_then(|param| param.value().as_bool())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    pub task_configs: Vec<TaskConfig>,
}

impl ProjectConfiguration {
    pub fn task(&self, task_id: &str) -> Option<&TaskConfig> {
        self.task_configs.iter().find(|task| task.task_id == task_id)
    }
}

fn get_task_config_entity(dto: TaskConfigDTO) -> Result<TaskConfig, MappingError> {
    Ok(TaskConfig {
        task_id: dto.task_id,
        training_constraints: get_parameters(dto.training.constraints)?,
        auto_training: get_parameters(dto.auto_training)?,
        predictions: get_parameters(dto.predictions)?,
    })
}

pub fn get_project_configuration_entity(
    dto: ProjectConfigurationDTO,
) -> Result<ProjectConfiguration, MappingError> {
    let task_configs = dto
        .task_configs
        .into_iter()
        .map(get_task_config_entity)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProjectConfiguration { task_configs })
}

/// Key/value changes for one task. `None` sections are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskConfigUpdate {
    pub task_id: String,
    pub training_constraints: Option<Vec<KeyValueParameter>>,
    pub auto_training: Option<Vec<KeyValueParameter>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectConfigurationUpdate {
    pub task_configs: Vec<TaskConfigUpdate>,
}

impl ProjectConfigurationUpdate {
    /// Update touching only the auto-training section of one task.
    pub fn auto_training(task_id: impl Into<String>, parameters: Vec<KeyValueParameter>) -> Self {
        Self {
            task_configs: vec![TaskConfigUpdate {
                task_id: task_id.into(),
                training_constraints: None,
                auto_training: Some(parameters),
            }],
        }
    }

    pub fn training_constraints(
        task_id: impl Into<String>,
        parameters: Vec<KeyValueParameter>,
    ) -> Self {
        Self {
            task_configs: vec![TaskConfigUpdate {
                task_id: task_id.into(),
                training_constraints: Some(parameters),
                auto_training: None,
            }],
        }
    }
}

/// Applies `update` to a cached configuration, matching tasks by id and
/// parameters by key. Tasks without an update are copied as they are.
pub fn apply_project_configuration_update(
    config: &ProjectConfiguration,
    update: &ProjectConfigurationUpdate,
) -> ProjectConfiguration {
    let task_configs = config
        .task_configs
        .iter()
        .map(|task| {
            let Some(task_update) = update
                .task_configs
                .iter()
                .find(|candidate| candidate.task_id == task.task_id)
            else {
                return task.clone();
            };

            let mut next = task.clone();
            if let Some(constraints) = &task_update.training_constraints {
                next.training_constraints =
                    get_updated_parameters(&task.training_constraints, constraints);
            }
            if let Some(auto_training) = &task_update.auto_training {
                next.auto_training = get_updated_parameters(&task.auto_training, auto_training);
            }
            next
        })
        .collect();

    ProjectConfiguration { task_configs }
}

fn key_values(parameters: &[KeyValueParameter]) -> Vec<KeyValueParameterDTO> {
    parameters.iter().map(KeyValueParameterDTO::from).collect()
}

/// Body for the project configuration `PATCH`: only keys and values go back.
pub fn get_project_configuration_upload_payload(
    update: &ProjectConfigurationUpdate,
) -> ProjectConfigurationUploadPayloadDTO {
    ProjectConfigurationUploadPayloadDTO {
        task_configs: update
            .task_configs
            .iter()
            .map(|task| TaskConfigUploadDTO {
                task_id: task.task_id.clone(),
                training: task
                    .training_constraints
                    .as_deref()
                    .map(|constraints| TrainingConstraintsUploadDTO {
                        constraints: key_values(constraints),
                    }),
                auto_training: task.auto_training.as_deref().map(key_values),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config() -> ProjectConfiguration {
        let dto: ProjectConfigurationDTO = serde_json::from_value(json!({
            "task_configs": [
                {
                    "task_id": "t1",
                    "training": {"constraints": [
                        {"key": "min_images_per_label", "type": "int", "name": "Minimum images",
                         "value": 12, "default_value": 12, "min_value": 3, "max_value": 100}
                    ]},
                    "auto_training": [
                        {"key": "enable", "type": "bool", "name": "Enable auto training",
                         "description": "", "value": false, "default_value": false},
                        {"key": "enable_dynamic_required_annotations", "type": "bool",
                         "value": true, "default_value": false}
                    ],
                    "predictions": []
                },
                {
                    "task_id": "t2",
                    "auto_training": [
                        {"key": "enable", "type": "bool", "value": true, "default_value": false}
                    ]
                }
            ]
        }))
        .unwrap();
        get_project_configuration_entity(dto).unwrap()
    }

    #[test]
    fn test_maps_task_configs() {
        let config = config();
        assert_eq!(config.task_configs.len(), 2);
        let t1 = config.task("t1").unwrap();
        assert_eq!(t1.training_constraints[0].key, "min_images_per_label");
        assert_eq!(t1.auto_training_enabled(), Some(false));
        assert!(config.task("t2").unwrap().training_constraints.is_empty());
    }

    #[test]
    fn test_apply_auto_training_update_only_touches_target_task() {
        let config = config();
        let update =
            ProjectConfigurationUpdate::auto_training("t1", vec![KeyValueParameter::new("enable", true)]);
        let next = apply_project_configuration_update(&config, &update);

        let t1 = next.task("t1").unwrap();
        assert_eq!(t1.auto_training_enabled(), Some(true));
        assert_eq!(t1.auto_training[1], config.task("t1").unwrap().auto_training[1]);
        assert_eq!(t1.training_constraints, config.task("t1").unwrap().training_constraints);
        assert_eq!(next.task("t2"), config.task("t2"));
    }

    #[test]
    fn test_apply_constraints_update() {
        let config = config();
        let update = ProjectConfigurationUpdate::training_constraints(
            "t1",
            vec![KeyValueParameter::new("min_images_per_label", 20i64)],
        );
        let next = apply_project_configuration_update(&config, &update);
        assert_eq!(
            next.task("t1").unwrap().training_constraints[0].value(),
            ParameterValue::Integer(20)
        );
    }

    #[test]
    fn test_unknown_task_is_noop() {
        let config = config();
        let update =
            ProjectConfigurationUpdate::auto_training("t9", vec![KeyValueParameter::new("enable", true)]);
        assert_eq!(apply_project_configuration_update(&config, &update), config);
    }

    #[test]
    fn test_upload_payload_is_key_value_only() {
        let update =
            ProjectConfigurationUpdate::auto_training("t1", vec![KeyValueParameter::new("enable", true)]);
        let payload = serde_json::to_value(get_project_configuration_upload_payload(&update)).unwrap();
        assert_eq!(
            payload,
            json!({"task_configs": [{"task_id": "t1", "auto_training": [{"key": "enable", "value": true}]}]})
        );
    }
}
