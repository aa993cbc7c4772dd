//! Project and training configuration: flat, key-addressed parameter lists.

mod parameter;
mod project;
mod training;

pub use parameter::{
    get_parameter, get_updated_parameters, ConfigurationParameter, ConfigurationParameterKind,
    KeyValueParameter,
};
pub use project::{
    apply_project_configuration_update, get_project_configuration_entity,
    get_project_configuration_upload_payload, ProjectConfiguration, ProjectConfigurationUpdate,
    TaskConfig, TaskConfigUpdate,
};
pub use training::{
    apply_training_configuration_update, get_training_configuration_entity,
    get_training_configuration_upload_payload, DatasetPreparation, TrainingConfiguration,
    TrainingConfigurationSection, TrainingConfigurationUpdate,
};
