use async_trait::async_trait;

use crate::dto::{
    ConfigurableParametersDTO, ConfigurableParametersReconfigureDTO, ModelConfigurationDTO,
    ProjectConfigurationDTO, ProjectConfigurationUploadPayloadDTO, TrainingConfigurationDTO,
    TrainingConfigurationUploadPayloadDTO,
};
use crate::identifiers::{ModelIdentifier, ProjectIdentifier, TrainingConfigurationQuery};

/// Remote configuration endpoints, in wire shapes.
#[async_trait]
pub trait ConfigurationApi: Send + Sync {
    fn name(&self) -> &str;

    async fn get_project_configuration(
        &self,
        project: &ProjectIdentifier,
    ) -> anyhow::Result<ProjectConfigurationDTO>;

    async fn update_project_configuration(
        &self,
        project: &ProjectIdentifier,
        payload: ProjectConfigurationUploadPayloadDTO,
    ) -> anyhow::Result<()>;

    async fn get_training_configuration(
        &self,
        project: &ProjectIdentifier,
        query: &TrainingConfigurationQuery,
    ) -> anyhow::Result<TrainingConfigurationDTO>;

    async fn update_training_configuration(
        &self,
        project: &ProjectIdentifier,
        query: &TrainingConfigurationQuery,
        payload: TrainingConfigurationUploadPayloadDTO,
    ) -> anyhow::Result<()>;

    async fn get_config_parameters(
        &self,
        project: &ProjectIdentifier,
    ) -> anyhow::Result<ConfigurableParametersDTO>;

    async fn get_model_config_parameters(
        &self,
        model: &ModelIdentifier,
    ) -> anyhow::Result<ModelConfigurationDTO>;

    async fn reconfigure_parameters(
        &self,
        project: &ProjectIdentifier,
        payload: ConfigurableParametersReconfigureDTO,
    ) -> anyhow::Result<()>;
}
