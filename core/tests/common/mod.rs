#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::oneshot;
use trainconf_core::api::{
    ConfigurableParametersDTO, ConfigurableParametersReconfigureDTO, ConfigurationApi,
    ModelConfigurationDTO, ModelIdentifier, ProjectConfigurationDTO,
    ProjectConfigurationUploadPayloadDTO, ProjectIdentifier, TrainingConfigurationDTO,
    TrainingConfigurationQuery, TrainingConfigurationUploadPayloadDTO,
};

pub fn project() -> ProjectIdentifier {
    ProjectIdentifier::new("org-1", "ws-1", "project-1")
}

pub fn model() -> ModelIdentifier {
    ModelIdentifier {
        project: project(),
        model_group_id: "group-1".to_string(),
        model_id: "model-1".to_string(),
    }
}

pub fn project_configuration_dto() -> ProjectConfigurationDTO {
    serde_json::from_value(json!({
        "task_configs": [{
            "task_id": "task-1",
            "training": {"constraints": [
                {"key": "min_images_per_label", "type": "int", "name": "Minimum images",
                 "description": "", "value": 12, "default_value": 12,
                 "min_value": 3, "max_value": 100}
            ]},
            "auto_training": [
                {"key": "enable", "type": "bool", "name": "Enable auto training",
                 "description": "", "value": false, "default_value": false}
            ],
            "predictions": []
        }]
    }))
    .expect("project configuration fixture")
}

pub fn config_parameters_dto() -> ConfigurableParametersDTO {
    serde_json::from_value(json!({
        "global": [{
            "id": "dataset",
            "header": "Dataset",
            "description": "Dataset management",
            "entity_identifier": {
                "type": "COMPONENT_PARAMETERS", "workspace_id": "ws-1",
                "project_id": "project-1", "component": "DATASET_COUNTER"
            },
            "parameters": [
                {"name": "required_images_auto_training", "header": "Images for auto training",
                 "description": "", "data_type": "integer", "template_type": "input",
                 "value": 12, "default_value": 12, "min_value": 3, "max_value": 10000}
            ]
        }],
        "task_chain": [{
            "task_id": "task-1",
            "task_title": "Detection",
            "components": [{
                "id": "hyper",
                "header": "Hyper parameters",
                "description": "",
                "entity_identifier": {
                    "type": "HYPER_PARAMETER_GROUP", "model_storage_id": "ms-1",
                    "workspace_id": "ws-1", "group_name": "learning_parameters"
                },
                "groups": [{
                    "name": "learning_parameters",
                    "header": "Learning parameters",
                    "description": "Parameters of the optimizer",
                    "parameters": [
                        {"name": "batch_size", "header": "Batch size", "description": "Images per step",
                         "data_type": "integer", "template_type": "input",
                         "value": 8, "default_value": 8, "min_value": 1, "max_value": 64},
                        {"name": "learning_rate", "header": "Learning rate", "description": "",
                         "data_type": "float", "template_type": "input",
                         "value": 0.01, "default_value": 0.01, "min_value": 0.0001, "max_value": 0.1},
                        {"name": "auto_hpo", "header": "Auto HPO", "description": "",
                         "data_type": "boolean", "template_type": "input",
                         "value": false, "default_value": false}
                    ]
                }],
                "parameters": [
                    {"name": "mode", "header": "Mode", "description": "",
                     "data_type": "string", "template_type": "selectable",
                     "value": "balance", "default_value": "balance",
                     "options": ["balance", "performance"]}
                ]
            }]
        }]
    }))
    .expect("configurable parameters fixture")
}

pub fn model_configuration_dto() -> ModelConfigurationDTO {
    let mut dto = config_parameters_dto();
    let task = dto.task_chain.remove(0);
    ModelConfigurationDTO {
        task_id: task.task_id,
        task_title: task.task_title,
        components: task.components,
    }
}

pub fn training_configuration_dto() -> TrainingConfigurationDTO {
    serde_json::from_value(json!({
        "task_id": "task-1",
        "dataset_preparation": {
            "subset_split": [
                {"key": "training", "type": "int", "value": 70, "default_value": 70}
            ]
        },
        "training": [
            {"key": "max_epochs", "type": "int", "value": 100, "default_value": 100}
        ]
    }))
    .expect("training configuration fixture")
}

/// In-memory [`ConfigurationApi`] that records every call and can be told to
/// fail writes or hold them until released.
pub struct FakeConfigurationApi {
    fail_writes: AtomicBool,
    write_gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
    pub calls: Mutex<Vec<String>>,
    pub project_uploads: Mutex<Vec<ProjectConfigurationUploadPayloadDTO>>,
    pub training_uploads: Mutex<Vec<TrainingConfigurationUploadPayloadDTO>>,
    pub reconfigure_uploads: Mutex<Vec<ConfigurableParametersReconfigureDTO>>,
}

impl FakeConfigurationApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail_writes: AtomicBool::new(false),
            write_gate: tokio::sync::Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            project_uploads: Mutex::new(Vec::new()),
            training_uploads: Mutex::new(Vec::new()),
            reconfigure_uploads: Mutex::new(Vec::new()),
        })
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The next write waits until the returned sender fires.
    pub async fn hold_next_write(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.write_gate.lock().await = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    async fn write(&self) -> anyhow::Result<()> {
        let gate = self.write_gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("request failed with status 500");
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigurationApi for FakeConfigurationApi {
    fn name(&self) -> &str {
        "fake"
    }

    async fn get_project_configuration(
        &self,
        _project: &ProjectIdentifier,
    ) -> anyhow::Result<ProjectConfigurationDTO> {
        self.record("get_project_configuration");
        Ok(project_configuration_dto())
    }

    async fn update_project_configuration(
        &self,
        _project: &ProjectIdentifier,
        payload: ProjectConfigurationUploadPayloadDTO,
    ) -> anyhow::Result<()> {
        self.record("update_project_configuration");
        self.project_uploads.lock().unwrap().push(payload);
        self.write().await
    }

    async fn get_training_configuration(
        &self,
        _project: &ProjectIdentifier,
        _query: &TrainingConfigurationQuery,
    ) -> anyhow::Result<TrainingConfigurationDTO> {
        self.record("get_training_configuration");
        Ok(training_configuration_dto())
    }

    async fn update_training_configuration(
        &self,
        _project: &ProjectIdentifier,
        _query: &TrainingConfigurationQuery,
        payload: TrainingConfigurationUploadPayloadDTO,
    ) -> anyhow::Result<()> {
        self.record("update_training_configuration");
        self.training_uploads.lock().unwrap().push(payload);
        self.write().await
    }

    async fn get_config_parameters(
        &self,
        _project: &ProjectIdentifier,
    ) -> anyhow::Result<ConfigurableParametersDTO> {
        self.record("get_config_parameters");
        Ok(config_parameters_dto())
    }

    async fn get_model_config_parameters(
        &self,
        _model: &ModelIdentifier,
    ) -> anyhow::Result<ModelConfigurationDTO> {
        self.record("get_model_config_parameters");
        Ok(model_configuration_dto())
    }

    async fn reconfigure_parameters(
        &self,
        _project: &ProjectIdentifier,
        payload: ConfigurableParametersReconfigureDTO,
    ) -> anyhow::Result<()> {
        self.record("reconfigure_parameters");
        self.reconfigure_uploads.lock().unwrap().push(payload);
        self.write().await
    }
}
