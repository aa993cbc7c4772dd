//! Wire shapes of the configuration API (snake_case, as sent by the server).

mod configurable_parameters;
mod entity_identifier;
mod project_configuration;
mod training_configuration;

pub use configurable_parameters::{
    ConfigurableParametersComponentsDTO, ConfigurableParametersDTO,
    ConfigurableParametersGroupsDTO, ConfigurableParametersParamsDTO,
    ConfigurableParametersReconfigureDTO, ConfigurableParametersTaskChainDTO,
    ModelConfigurationDTO, ReconfigureComponentDTO, ReconfigureGroupDTO, ReconfigureParameterDTO,
    ReconfigureTaskChainDTO,
};
pub use entity_identifier::EntityIdentifierDTO;
pub use project_configuration::{
    ConfigurationParameterDTO, KeyValueParameterDTO, ProjectConfigurationDTO,
    ProjectConfigurationUploadPayloadDTO, TaskConfigDTO, TaskConfigUploadDTO,
    TrainingConstraintsDTO, TrainingConstraintsUploadDTO,
};
pub use training_configuration::{
    DatasetPreparationDTO, DatasetPreparationUploadDTO, TrainingConfigurationDTO,
    TrainingConfigurationUploadPayloadDTO,
};
