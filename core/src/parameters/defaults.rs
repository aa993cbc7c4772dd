use std::sync::Arc;

use super::path::ParameterPath;
use super::types::{
    ConfigurableParametersComponents, ConfigurableParametersGroups, ConfigurableParametersParams,
    ConfigurableParametersTaskChain, ConfigurableParametersTree,
};
use super::update::{replace_all, replace_first};

fn reset_group(group: &ConfigurableParametersGroups) -> Option<ConfigurableParametersGroups> {
    let parameters = replace_all(
        &group.parameters,
        ConfigurableParametersParams::with_default_value,
    )?;
    Some(ConfigurableParametersGroups {
        parameters,
        ..group.clone()
    })
}

fn reset_component(
    component: &ConfigurableParametersComponents,
) -> Option<ConfigurableParametersComponents> {
    let groups = component
        .groups
        .as_deref()
        .and_then(|groups| replace_all(groups, reset_group));
    let parameters = component
        .parameters
        .as_deref()
        .and_then(|params| replace_all(params, ConfigurableParametersParams::with_default_value));

    if groups.is_none() && parameters.is_none() {
        return None;
    }
    Some(ConfigurableParametersComponents {
        groups: groups.or_else(|| component.groups.clone()),
        parameters: parameters.or_else(|| component.parameters.clone()),
        ..component.clone()
    })
}

fn reset_task(task: &ConfigurableParametersTaskChain) -> Option<ConfigurableParametersTaskChain> {
    let components = replace_all(&task.components, reset_component)?;
    Some(ConfigurableParametersTaskChain {
        components,
        ..task.clone()
    })
}

/// Every parameter of the tree back to its default value.
pub fn reset_parameters_to_default(
    tree: &[Arc<ConfigurableParametersTaskChain>],
) -> ConfigurableParametersTree {
    replace_all(tree, reset_task).unwrap_or_else(|| tree.to_vec())
}

/// Every parameter of one component back to its default value.
pub fn reset_component_to_default(
    tree: &[Arc<ConfigurableParametersTaskChain>],
    task_id: &str,
    component_id: &str,
) -> ConfigurableParametersTree {
    replace_first(
        tree,
        |task| task.task_id == task_id,
        |task| {
            let components =
                replace_first(&task.components, |c| c.id == component_id, reset_component)?;
            Some(ConfigurableParametersTaskChain {
                components,
                ..task.clone()
            })
        },
    )
    .unwrap_or_else(|| tree.to_vec())
}

/// Every parameter of one group back to its default value.
pub fn reset_group_to_default(
    tree: &[Arc<ConfigurableParametersTaskChain>],
    task_id: &str,
    component_id: &str,
    group_id: &str,
) -> ConfigurableParametersTree {
    replace_first(
        tree,
        |task| task.task_id == task_id,
        |task| {
            let components = replace_first(
                &task.components,
                |c| c.id == component_id,
                |component| {
                    let groups = replace_first(
                        component.groups.as_deref()?,
                        |group| group.id == group_id,
                        reset_group,
                    )?;
                    Some(ConfigurableParametersComponents {
                        groups: Some(groups),
                        ..component.clone()
                    })
                },
            )?;
            Some(ConfigurableParametersTaskChain {
                components,
                ..task.clone()
            })
        },
    )
    .unwrap_or_else(|| tree.to_vec())
}

/// Paths of the parameters whose value differs from their default.
pub fn changed_parameters(tree: &[Arc<ConfigurableParametersTaskChain>]) -> Vec<ParameterPath> {
    tree.iter()
        .flat_map(|task| task.components.iter())
        .flat_map(|component| component.all_parameters())
        .filter(|param| !param.is_default())
        .map(|param| param.id.clone())
        .collect()
}

pub fn has_changed_parameters(tree: &[Arc<ConfigurableParametersTaskChain>]) -> bool {
    tree.iter()
        .flat_map(|task| task.components.iter())
        .flat_map(|component| component.all_parameters())
        .any(|param| !param.is_default())
}
