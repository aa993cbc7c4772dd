//! Domain tree of the legacy configurable-parameters API.
//!
//! task chain -> component -> (group) -> parameter. Every leaf carries a
//! [`ParameterPath`] so a flat update can be routed back into the tree.

mod defaults;
mod mapper;
mod path;
mod payload;
mod types;
mod update;
mod value;

pub use defaults::{
    changed_parameters, has_changed_parameters, reset_component_to_default,
    reset_group_to_default, reset_parameters_to_default,
};
pub use mapper::{
    get_config_parameters_entity, get_configurable_parameter, get_model_config_entity,
    get_task_chain_entity,
};
pub use path::{ParameterPath, PATH_SEPARATOR};
pub use payload::get_reconfigure_parameters_dto;
pub use types::{
    ConfigurableParametersComponents, ConfigurableParametersGroups, ConfigurableParametersParams,
    ConfigurableParametersTaskChain, ConfigurableParametersTree, DataType, EntityIdentifier,
    ParameterKind, TemplateType, GLOBAL_TASK_ID, GLOBAL_TASK_TITLE,
};
pub use update::{resolve_parameter, update_selected_parameter, update_selected_parameter_by_id};
pub use value::ParameterValue;
