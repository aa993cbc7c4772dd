//! Query/mutation services over a [`ConfigurationApi`].

pub mod r#trait;

mod config_parameters;
mod project_configuration;
mod training_configuration;

pub use config_parameters::ConfigParametersService;
pub use project_configuration::ProjectConfigurationService;
pub use r#trait::ConfigurationApi;
pub use training_configuration::TrainingConfigurationService;
