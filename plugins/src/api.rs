use async_trait::async_trait;
use reqwest::Method;
use trainconf_core::api::{
    ConfigurableParametersDTO, ConfigurableParametersReconfigureDTO, ConfigurationApi,
    ModelConfigurationDTO, ModelIdentifier, ProjectConfigurationDTO,
    ProjectConfigurationUploadPayloadDTO, ProjectIdentifier, TrainingConfigurationDTO,
    TrainingConfigurationQuery, TrainingConfigurationUploadPayloadDTO,
};

use crate::http::HttpClient;

/// [`ConfigurationApi`] backed by the REST endpoints of a project.
pub struct HttpConfigurationApi {
    client: HttpClient,
}

impl HttpConfigurationApi {
    pub fn new(base_url: String, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let client = HttpClient::new(base_url, api_key, timeout_ms)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ConfigurationApi for HttpConfigurationApi {
    fn name(&self) -> &str {
        "http"
    }

    async fn get_project_configuration(
        &self,
        project: &ProjectIdentifier,
    ) -> anyhow::Result<ProjectConfigurationDTO> {
        let url = self.client.project_url(project, "project_configuration");
        let dto: ProjectConfigurationDTO = self.client.get_json(&url, &[]).await?;
        tracing::debug!(
            target: "trainconf.api",
            stage = "api.project_configuration.get.out",
            project = %project,
            tasks = dto.task_configs.len()
        );
        Ok(dto)
    }

    async fn update_project_configuration(
        &self,
        project: &ProjectIdentifier,
        payload: ProjectConfigurationUploadPayloadDTO,
    ) -> anyhow::Result<()> {
        let url = self.client.project_url(project, "project_configuration");
        tracing::debug!(
            target: "trainconf.api",
            stage = "api.project_configuration.update.in",
            project = %project,
            tasks = payload.task_configs.len()
        );
        self.client
            .send_json(Method::PATCH, &url, &[], &payload)
            .await
    }

    async fn get_training_configuration(
        &self,
        project: &ProjectIdentifier,
        query: &TrainingConfigurationQuery,
    ) -> anyhow::Result<TrainingConfigurationDTO> {
        let url = self.client.project_url(project, "training_configuration");
        self.client.get_json(&url, &query.as_pairs()).await
    }

    async fn update_training_configuration(
        &self,
        project: &ProjectIdentifier,
        query: &TrainingConfigurationQuery,
        payload: TrainingConfigurationUploadPayloadDTO,
    ) -> anyhow::Result<()> {
        let url = self.client.project_url(project, "training_configuration");
        tracing::debug!(
            target: "trainconf.api",
            stage = "api.training_configuration.update.in",
            project = %project,
            task_id = ?query.task_id
        );
        self.client
            .send_json(Method::PATCH, &url, &query.as_pairs(), &payload)
            .await
    }

    async fn get_config_parameters(
        &self,
        project: &ProjectIdentifier,
    ) -> anyhow::Result<ConfigurableParametersDTO> {
        let url = self.client.project_url(project, "configuration");
        let dto: ConfigurableParametersDTO = self.client.get_json(&url, &[]).await?;
        tracing::debug!(
            target: "trainconf.api",
            stage = "api.config_parameters.get.out",
            project = %project,
            global = dto.global.len(),
            tasks = dto.task_chain.len()
        );
        Ok(dto)
    }

    async fn get_model_config_parameters(
        &self,
        model: &ModelIdentifier,
    ) -> anyhow::Result<ModelConfigurationDTO> {
        let url = self.client.project_url(
            &model.project,
            &format!(
                "model_groups/{}/models/{}/configuration",
                model.model_group_id, model.model_id
            ),
        );
        self.client.get_json(&url, &[]).await
    }

    async fn reconfigure_parameters(
        &self,
        project: &ProjectIdentifier,
        payload: ConfigurableParametersReconfigureDTO,
    ) -> anyhow::Result<()> {
        let url = self.client.project_url(project, "configuration");
        tracing::debug!(
            target: "trainconf.api",
            stage = "api.config_parameters.reconfigure.in",
            project = %project,
            global = payload.global.len(),
            tasks = payload.task_chain.len()
        );
        self.client
            .send_json(Method::POST, &url, &[], &payload)
            .await
    }
}
