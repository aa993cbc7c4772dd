use serde::Serialize;
use std::sync::Arc;

use super::path::ParameterPath;
use super::value::ParameterValue;
use crate::dto::EntityIdentifierDTO;

/// Task id of the synthetic entry that holds project-wide components.
pub const GLOBAL_TASK_ID: &str = "global";
pub const GLOBAL_TASK_TITLE: &str = "Global";

/// Root of the tree consumed by the UI: one entry per task plus `global`.
pub type ConfigurableParametersTree = Vec<Arc<ConfigurableParametersTaskChain>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Boolean,
    Integer,
    Float,
    String,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Input,
    Selectable,
}

/// Value, default and bounds of a parameter, one variant per supported
/// `(data_type, template_type)` combination.
///
/// Selectable parameters share one variant whatever their data type; the
/// options always hold values of `data_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParameterKind {
    #[serde(rename_all = "camelCase")]
    Boolean { value: bool, default_value: bool },
    #[serde(rename_all = "camelCase")]
    Integer {
        value: i64,
        default_value: i64,
        min_value: Option<i64>,
        max_value: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Float {
        value: f64,
        default_value: f64,
        min_value: Option<f64>,
        max_value: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Selectable {
        data_type: DataType,
        value: ParameterValue,
        default_value: ParameterValue,
        options: Vec<ParameterValue>,
    },
}

impl ParameterKind {
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Boolean { .. } => DataType::Boolean,
            Self::Integer { .. } => DataType::Integer,
            Self::Float { .. } => DataType::Float,
            Self::Selectable { data_type, .. } => *data_type,
        }
    }

    pub fn template_type(&self) -> TemplateType {
        match self {
            Self::Selectable { .. } => TemplateType::Selectable,
            _ => TemplateType::Input,
        }
    }

    pub fn value(&self) -> ParameterValue {
        match self {
            Self::Boolean { value, .. } => ParameterValue::Boolean(*value),
            Self::Integer { value, .. } => ParameterValue::Integer(*value),
            Self::Float { value, .. } => ParameterValue::Float(*value),
            Self::Selectable { value, .. } => value.clone(),
        }
    }

    pub fn default_value(&self) -> ParameterValue {
        match self {
            Self::Boolean { default_value, .. } => ParameterValue::Boolean(*default_value),
            Self::Integer { default_value, .. } => ParameterValue::Integer(*default_value),
            Self::Float { default_value, .. } => ParameterValue::Float(*default_value),
            Self::Selectable { default_value, .. } => default_value.clone(),
        }
    }

    /// Replaces the value when `new_value` fits the variant's type.
    ///
    /// Returns `false` and leaves the value untouched otherwise. Bounds and
    /// options are not enforced here.
    pub fn set_value(&mut self, new_value: &ParameterValue) -> bool {
        match self {
            Self::Boolean { value, .. } => match new_value.as_bool() {
                Some(b) => {
                    *value = b;
                    true
                }
                None => false,
            },
            Self::Integer { value, .. } => match new_value.as_i64() {
                Some(i) => {
                    *value = i;
                    true
                }
                None => false,
            },
            Self::Float { value, .. } => match new_value.as_f64() {
                Some(f) => {
                    *value = f;
                    true
                }
                None => false,
            },
            Self::Selectable {
                data_type, value, ..
            } => {
                let coerced = match (*data_type, new_value) {
                    (DataType::Float, v) => v.as_f64().map(ParameterValue::Float),
                    (DataType::Integer, ParameterValue::Integer(_))
                    | (DataType::String, ParameterValue::String(_))
                    | (DataType::Boolean, ParameterValue::Boolean(_)) => Some(new_value.clone()),
                    _ => None,
                };
                match coerced {
                    Some(v) => {
                        *value = v;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    pub fn reset_to_default(&mut self) {
        match self {
            Self::Boolean {
                value,
                default_value,
            } => *value = *default_value,
            Self::Integer {
                value,
                default_value,
                ..
            } => *value = *default_value,
            Self::Float {
                value,
                default_value,
                ..
            } => *value = *default_value,
            Self::Selectable {
                value,
                default_value,
                ..
            } => *value = default_value.clone(),
        }
    }
}

/// Leaf of the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurableParametersParams {
    pub id: ParameterPath,
    pub name: String,
    pub header: String,
    pub description: String,
    pub warning: Option<String>,
    pub editable: bool,
    #[serde(flatten)]
    pub kind: ParameterKind,
}

impl ConfigurableParametersParams {
    pub fn value(&self) -> ParameterValue {
        self.kind.value()
    }

    pub fn default_value(&self) -> ParameterValue {
        self.kind.default_value()
    }

    pub fn is_default(&self) -> bool {
        self.kind.value() == self.kind.default_value()
    }

    /// Copy of `self` holding `value`, or `None` when the type does not fit.
    pub fn with_value(&self, value: &ParameterValue) -> Option<Self> {
        let mut next = self.clone();
        next.kind.set_value(value).then_some(next)
    }

    /// Copy of `self` reset to its default, or `None` when already default.
    pub fn with_default_value(&self) -> Option<Self> {
        if self.is_default() {
            return None;
        }
        let mut next = self.clone();
        next.kind.reset_to_default();
        Some(next)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurableParametersGroups {
    pub id: String,
    pub name: String,
    pub header: String,
    pub description: String,
    pub parameters: Vec<Arc<ConfigurableParametersParams>>,
}

/// What a component configures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EntityIdentifier {
    #[serde(rename_all = "camelCase")]
    HyperParameterGroup {
        model_storage_id: String,
        workspace_id: String,
        group_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Component {
        workspace_id: String,
        project_id: String,
        task_id: Option<String>,
        component: String,
    },
}

impl From<EntityIdentifierDTO> for EntityIdentifier {
    fn from(dto: EntityIdentifierDTO) -> Self {
        match dto {
            EntityIdentifierDTO::HyperParameterGroup {
                model_storage_id,
                workspace_id,
                group_name,
            } => Self::HyperParameterGroup {
                model_storage_id,
                workspace_id,
                group_name: Some(group_name),
            },
            EntityIdentifierDTO::HyperParameters {
                model_storage_id,
                workspace_id,
            } => Self::HyperParameterGroup {
                model_storage_id,
                workspace_id,
                group_name: None,
            },
            EntityIdentifierDTO::ComponentParameters {
                workspace_id,
                project_id,
                task_id,
                component,
            } => Self::Component {
                workspace_id,
                project_id,
                task_id,
                component,
            },
        }
    }
}

impl From<&EntityIdentifier> for EntityIdentifierDTO {
    fn from(entity: &EntityIdentifier) -> Self {
        match entity.clone() {
            EntityIdentifier::HyperParameterGroup {
                model_storage_id,
                workspace_id,
                group_name: Some(group_name),
            } => Self::HyperParameterGroup {
                model_storage_id,
                workspace_id,
                group_name,
            },
            EntityIdentifier::HyperParameterGroup {
                model_storage_id,
                workspace_id,
                group_name: None,
            } => Self::HyperParameters {
                model_storage_id,
                workspace_id,
            },
            EntityIdentifier::Component {
                workspace_id,
                project_id,
                task_id,
                component,
            } => Self::ComponentParameters {
                workspace_id,
                project_id,
                task_id,
                component,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurableParametersComponents {
    pub id: String,
    pub header: String,
    pub description: String,
    pub entity_identifier: EntityIdentifier,
    pub groups: Option<Vec<Arc<ConfigurableParametersGroups>>>,
    pub parameters: Option<Vec<Arc<ConfigurableParametersParams>>>,
}

impl ConfigurableParametersComponents {
    /// Flat parameters first, then grouped ones in group order.
    pub fn all_parameters(&self) -> impl Iterator<Item = &Arc<ConfigurableParametersParams>> {
        let flat = self.parameters.iter().flatten();
        let grouped = self
            .groups
            .iter()
            .flatten()
            .flat_map(|group| group.parameters.iter());
        flat.chain(grouped)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurableParametersTaskChain {
    pub task_id: String,
    pub task_title: String,
    pub components: Vec<Arc<ConfigurableParametersComponents>>,
}

impl ConfigurableParametersTaskChain {
    pub fn is_global(&self) -> bool {
        self.task_id == GLOBAL_TASK_ID
    }
}
