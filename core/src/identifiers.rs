use serde::{Deserialize, Serialize};
use std::fmt;

/// Addresses one project on the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectIdentifier {
    pub organization_id: String,
    pub workspace_id: String,
    pub project_id: String,
}

impl ProjectIdentifier {
    pub fn new(
        organization_id: impl Into<String>,
        workspace_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            organization_id: organization_id.into(),
            workspace_id: workspace_id.into(),
            project_id: project_id.into(),
        }
    }
}

impl fmt::Display for ProjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.organization_id, self.workspace_id, self.project_id
        )
    }
}

/// Addresses one trained model inside a project's model group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelIdentifier {
    pub project: ProjectIdentifier,
    pub model_group_id: String,
    pub model_id: String,
}

impl fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/model_groups/{}/models/{}",
            self.project, self.model_group_id, self.model_id
        )
    }
}

/// Optional selectors of the training configuration endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingConfigurationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_manifest_id: Option<String>,
}

impl TrainingConfigurationQuery {
    pub fn for_task(task_id: impl Into<String>) -> Self {
        Self {
            task_id: Some(task_id.into()),
            model_manifest_id: None,
        }
    }

    pub fn with_model_manifest(mut self, model_manifest_id: impl Into<String>) -> Self {
        self.model_manifest_id = Some(model_manifest_id.into());
        self
    }

    /// Query-string pairs for the populated selectors.
    pub fn as_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(task_id) = &self.task_id {
            pairs.push(("task_id", task_id.clone()));
        }
        if let Some(model_manifest_id) = &self.model_manifest_id {
            pairs.push(("model_manifest_id", model_manifest_id.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_identifier_display() {
        let project = ProjectIdentifier::new("org", "ws", "p1");
        assert_eq!(project.to_string(), "org/ws/p1");
    }

    #[test]
    fn test_training_query_pairs_skip_missing() {
        assert!(TrainingConfigurationQuery::default().as_pairs().is_empty());

        let query = TrainingConfigurationQuery::for_task("t1").with_model_manifest("m1");
        assert_eq!(
            query.as_pairs(),
            vec![
                ("task_id", "t1".to_string()),
                ("model_manifest_id", "m1".to_string())
            ]
        );
    }
}
