use std::sync::Arc;

use super::path::ParameterPath;
use super::types::{
    ConfigurableParametersComponents, ConfigurableParametersGroups, ConfigurableParametersParams,
    ConfigurableParametersTaskChain, ConfigurableParametersTree,
};
use super::value::ParameterValue;

/// Replaces the first item matching `is_target` with `update(item)`.
///
/// `None` when nothing matched or `update` declined; callers then keep the
/// original slice, so untouched levels stay pointer-equal.
pub(crate) fn replace_first<T, P, F>(
    items: &[Arc<T>],
    is_target: P,
    update: F,
) -> Option<Vec<Arc<T>>>
where
    P: Fn(&T) -> bool,
    F: FnOnce(&T) -> Option<T>,
{
    let index = items.iter().position(|item| is_target(item.as_ref()))?;
    let updated = update(items[index].as_ref())?;
    let mut next = items.to_vec();
    next[index] = Arc::new(updated);
    Some(next)
}

/// Applies `update` to every item; `None` when no item changed.
pub(crate) fn replace_all<T, F>(items: &[Arc<T>], update: F) -> Option<Vec<Arc<T>>>
where
    F: Fn(&T) -> Option<T>,
{
    let mut changed = false;
    let next = items
        .iter()
        .map(|item| match update(item.as_ref()) {
            Some(updated) => {
                changed = true;
                Arc::new(updated)
            }
            None => Arc::clone(item),
        })
        .collect();
    changed.then_some(next)
}

/// Rebuilds `component` with `update` applied inside the group or flat list
/// that `path` points at.
pub(crate) fn update_component_at<F>(
    component: &ConfigurableParametersComponents,
    path: &ParameterPath,
    update: F,
) -> Option<ConfigurableParametersComponents>
where
    F: FnOnce(&ConfigurableParametersParams) -> Option<ConfigurableParametersParams>,
{
    match &path.group_id {
        Some(group_id) => {
            let groups = replace_first(
                component.groups.as_deref()?,
                |group| group.id == *group_id,
                |group| {
                    let parameters =
                        replace_first(&group.parameters, |param| param.id == *path, update)?;
                    Some(ConfigurableParametersGroups {
                        parameters,
                        ..group.clone()
                    })
                },
            )?;
            Some(ConfigurableParametersComponents {
                groups: Some(groups),
                ..component.clone()
            })
        }
        None => {
            let parameters = replace_first(
                component.parameters.as_deref()?,
                |param| param.id == *path,
                update,
            )?;
            Some(ConfigurableParametersComponents {
                parameters: Some(parameters),
                ..component.clone()
            })
        }
    }
}

/// Returns a new tree in which the parameter at `path` holds `value`.
///
/// Walks task, component, optional group, then parameter. A level with no
/// match is returned unchanged, as is a value whose type does not fit the
/// parameter; neither is an error. Nodes off the path are shared with `tree`.
pub fn update_selected_parameter(
    tree: &[Arc<ConfigurableParametersTaskChain>],
    path: &ParameterPath,
    value: &ParameterValue,
) -> ConfigurableParametersTree {
    let updated = replace_first(
        tree,
        |task| task.task_id == path.task_id,
        |task| {
            let components = replace_first(
                &task.components,
                |component| component.id == path.component_id,
                |component| {
                    update_component_at(component, path, |param| {
                        let next = param.with_value(value);
                        if next.is_none() {
                            tracing::warn!(
                                target: "trainconf.update",
                                id = %path,
                                expected = param.kind.data_type().as_str(),
                                found = value.type_name(),
                                "value type does not fit parameter, keeping current value"
                            );
                        }
                        next
                    })
                },
            )?;
            Some(ConfigurableParametersTaskChain {
                components,
                ..task.clone()
            })
        },
    );

    match updated {
        Some(tree) => tree,
        None => {
            tracing::debug!(
                target: "trainconf.update",
                stage = "update.selected_parameter.miss",
                id = %path
            );
            tree.to_vec()
        }
    }
}

/// String entry point: `task::component::leaf` addresses a flat parameter,
/// `task::component::group::leaf` a grouped one. Malformed ids are a no-op.
pub fn update_selected_parameter_by_id(
    tree: &[Arc<ConfigurableParametersTaskChain>],
    id: &str,
    value: &ParameterValue,
) -> ConfigurableParametersTree {
    match id.parse::<ParameterPath>() {
        Ok(path) => update_selected_parameter(tree, &path, value),
        Err(err) => {
            tracing::debug!(target: "trainconf.update", error = %err, "ignoring malformed id");
            tree.to_vec()
        }
    }
}

/// Looks up the parameter at `path`.
pub fn resolve_parameter(
    tree: &[Arc<ConfigurableParametersTaskChain>],
    path: &ParameterPath,
) -> Option<Arc<ConfigurableParametersParams>> {
    let task = tree.iter().find(|task| task.task_id == path.task_id)?;
    let component = task
        .components
        .iter()
        .find(|component| component.id == path.component_id)?;
    let parameters = match &path.group_id {
        Some(group_id) => {
            let group = component
                .groups
                .as_deref()?
                .iter()
                .find(|group| group.id == *group_id)?;
            &group.parameters
        }
        None => component.parameters.as_ref()?,
    };
    parameters.iter().find(|param| param.id == *path).cloned()
}
