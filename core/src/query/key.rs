use serde::Serialize;
use std::fmt;

use crate::identifiers::{ModelIdentifier, ProjectIdentifier, TrainingConfigurationQuery};

/// Identity of one cached server read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryKey {
    ProjectConfiguration {
        project: ProjectIdentifier,
    },
    TrainingConfiguration {
        project: ProjectIdentifier,
        query: TrainingConfigurationQuery,
    },
    ConfigParameters {
        project: ProjectIdentifier,
    },
    ModelConfigParameters {
        model: ModelIdentifier,
    },
}

impl QueryKey {
    pub fn project_configuration(project: &ProjectIdentifier) -> Self {
        Self::ProjectConfiguration {
            project: project.clone(),
        }
    }

    pub fn training_configuration(
        project: &ProjectIdentifier,
        query: &TrainingConfigurationQuery,
    ) -> Self {
        Self::TrainingConfiguration {
            project: project.clone(),
            query: query.clone(),
        }
    }

    pub fn config_parameters(project: &ProjectIdentifier) -> Self {
        Self::ConfigParameters {
            project: project.clone(),
        }
    }

    pub fn model_config_parameters(model: &ModelIdentifier) -> Self {
        Self::ModelConfigParameters {
            model: model.clone(),
        }
    }

    pub fn project(&self) -> &ProjectIdentifier {
        match self {
            Self::ProjectConfiguration { project }
            | Self::TrainingConfiguration { project, .. }
            | Self::ConfigParameters { project } => project,
            Self::ModelConfigParameters { model } => &model.project,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectConfiguration { project } => {
                write!(f, "project-configuration:{project}")
            }
            Self::TrainingConfiguration { project, query } => {
                write!(f, "training-configuration:{project}")?;
                for (name, value) in query.as_pairs() {
                    write!(f, ":{name}={value}")?;
                }
                Ok(())
            }
            Self::ConfigParameters { project } => write!(f, "config-parameters:{project}"),
            Self::ModelConfigParameters { model } => {
                write!(f, "model-config-parameters:{model}")
            }
        }
    }
}
