//! Stable re-exports for consumers (`plugins` and external crates).
//!
//! Prefer importing from `trainconf_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, AppConfig, CacheConfig, LoggingConfig, ServerConfig,
};
pub use crate::configuration::{
    get_updated_parameters, ConfigurationParameter, ConfigurationParameterKind,
    KeyValueParameter, ProjectConfiguration, ProjectConfigurationUpdate, TaskConfig,
    TaskConfigUpdate, TrainingConfiguration, TrainingConfigurationSection,
    TrainingConfigurationUpdate,
};
pub use crate::context::{ApiFactory, AppContext, Services};
pub use crate::dto::{
    ConfigurableParametersDTO, ConfigurableParametersReconfigureDTO, ModelConfigurationDTO,
    ProjectConfigurationDTO, ProjectConfigurationUploadPayloadDTO, TrainingConfigurationDTO,
    TrainingConfigurationUploadPayloadDTO,
};
pub use crate::error::{ConfigError, MappingError, MutationError, PathError, QueryError};
pub use crate::identifiers::{ModelIdentifier, ProjectIdentifier, TrainingConfigurationQuery};
pub use crate::logging::init_tracing;
pub use crate::mutation::{MutationPhase, OptimisticMutation};
pub use crate::parameters::{
    update_selected_parameter, ConfigurableParametersTree, ParameterKind, ParameterPath,
    ParameterValue,
};
pub use crate::query::{CacheEvent, QueryCache, QueryClient, QueryKey};
pub use crate::service::{
    ConfigParametersService, ConfigurationApi, ProjectConfigurationService,
    TrainingConfigurationService,
};
