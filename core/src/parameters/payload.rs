use std::sync::Arc;

use super::types::{
    ConfigurableParametersComponents, ConfigurableParametersParams, ConfigurableParametersTaskChain,
};
use crate::dto::{
    ConfigurableParametersReconfigureDTO, EntityIdentifierDTO, ReconfigureComponentDTO,
    ReconfigureGroupDTO, ReconfigureParameterDTO, ReconfigureTaskChainDTO,
};

fn parameter_dto(param: &Arc<ConfigurableParametersParams>) -> ReconfigureParameterDTO {
    ReconfigureParameterDTO {
        name: param.name.clone(),
        value: param.value().to_json(),
    }
}

fn component_dto(component: &ConfigurableParametersComponents) -> ReconfigureComponentDTO {
    let groups = component
        .groups
        .iter()
        .flatten()
        .map(|group| ReconfigureGroupDTO {
            name: group.name.clone(),
            parameters: group.parameters.iter().map(parameter_dto).collect(),
        })
        .collect();
    let parameters = component
        .parameters
        .iter()
        .flatten()
        .map(parameter_dto)
        .collect();

    ReconfigureComponentDTO {
        entity_identifier: EntityIdentifierDTO::from(&component.entity_identifier),
        groups,
        parameters,
    }
}

/// Builds the reconfigure request body from a domain tree.
///
/// Only entity identifiers, group names and `name`/`value` pairs are sent;
/// composite ids and metadata stay client-side. The `global` entry becomes the
/// top-level `global` list.
pub fn get_reconfigure_parameters_dto(
    tree: &[Arc<ConfigurableParametersTaskChain>],
) -> ConfigurableParametersReconfigureDTO {
    let mut payload = ConfigurableParametersReconfigureDTO::default();
    for task in tree {
        let components = task.components.iter().map(|c| component_dto(c)).collect();
        if task.is_global() {
            payload.global = components;
        } else {
            payload.task_chain.push(ReconfigureTaskChainDTO {
                task_id: task.task_id.clone(),
                components,
            });
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::ConfigurableParametersDTO;
    use crate::parameters::mapper::get_config_parameters_entity;
    use crate::parameters::update::update_selected_parameter;
    use crate::parameters::value::ParameterValue;
    use serde_json::json;

    fn dto() -> ConfigurableParametersDTO {
        serde_json::from_value(json!({
            "global": [{
                "id": "dataset",
                "header": "Dataset",
                "entity_identifier": {
                    "type": "COMPONENT_PARAMETERS", "workspace_id": "ws",
                    "project_id": "p", "component": "DATASET_COUNTER"
                },
                "parameters": [
                    {"name": "auto_training", "data_type": "boolean", "template_type": "input", "value": true, "default_value": true}
                ]
            }],
            "task_chain": [{
                "task_id": "t1",
                "task_title": "Detection",
                "components": [{
                    "id": "hyper",
                    "header": "Hyper parameters",
                    "entity_identifier": {
                        "type": "HYPER_PARAMETER_GROUP", "model_storage_id": "ms",
                        "workspace_id": "ws", "group_name": "learning_parameters"
                    },
                    "groups": [{
                        "name": "learning_parameters",
                        "header": "Learning",
                        "parameters": [
                            {"name": "batch_size", "data_type": "integer", "template_type": "input", "value": 8, "default_value": 8, "min_value": 1, "max_value": 64}
                        ]
                    }]
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_payload_carries_names_and_values_only() {
        let tree = get_config_parameters_entity(dto()).unwrap();
        let path = tree[1].components[0].groups.as_ref().unwrap()[0].parameters[0]
            .id
            .clone();
        let tree = update_selected_parameter(&tree, &path, &ParameterValue::Integer(32));

        let payload = get_reconfigure_parameters_dto(&tree);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["global"][0]["parameters"][0]["name"], "auto_training");
        assert_eq!(json["global"][0]["parameters"][0]["value"], true);
        let task = &json["task_chain"][0];
        assert_eq!(task["task_id"], "t1");
        let group = &task["components"][0]["groups"][0];
        assert_eq!(group["name"], "learning_parameters");
        assert_eq!(group["parameters"][0], json!({"name": "batch_size", "value": 32}));
        assert_eq!(
            task["components"][0]["entity_identifier"]["type"],
            "HYPER_PARAMETER_GROUP"
        );
        assert!(!json.to_string().contains(&path.to_string()));
    }
}
