use std::sync::Arc;

use super::r#trait::ConfigurationApi;
use crate::configuration::{
    apply_project_configuration_update, get_project_configuration_entity,
    get_project_configuration_upload_payload, KeyValueParameter, ProjectConfiguration,
    ProjectConfigurationUpdate,
};
use crate::error::{MutationError, QueryError};
use crate::identifiers::ProjectIdentifier;
use crate::mutation::OptimisticMutation;
use crate::query::{QueryCache, QueryKey};

#[derive(Clone)]
pub struct ProjectConfigurationService {
    api: Arc<dyn ConfigurationApi>,
    cache: QueryCache<ProjectConfiguration>,
}

impl ProjectConfigurationService {
    pub fn new(api: Arc<dyn ConfigurationApi>, cache: QueryCache<ProjectConfiguration>) -> Self {
        Self { api, cache }
    }

    async fn fetch(&self, project: &ProjectIdentifier) -> Result<ProjectConfiguration, QueryError> {
        let dto = self
            .api
            .get_project_configuration(project)
            .await
            .map_err(QueryError::Fetch)?;
        Ok(get_project_configuration_entity(dto)?)
    }

    /// Cached configuration, fetched when missing or invalidated.
    pub async fn query(
        &self,
        project: &ProjectIdentifier,
    ) -> Result<ProjectConfiguration, QueryError> {
        let key = QueryKey::project_configuration(project);
        self.cache
            .ensure_query_data(&key, || self.fetch(project))
            .await
    }

    pub async fn refetch(
        &self,
        project: &ProjectIdentifier,
    ) -> Result<ProjectConfiguration, QueryError> {
        let key = QueryKey::project_configuration(project);
        self.cache.fetch_query(&key, self.fetch(project)).await
    }

    /// Applies `update` to the cached configuration right away and sends the
    /// key/value payload. A failed request puts the previous value back.
    pub async fn mutate(
        &self,
        project: &ProjectIdentifier,
        update: ProjectConfigurationUpdate,
    ) -> Result<(), MutationError> {
        let key = QueryKey::project_configuration(project);
        let payload = get_project_configuration_upload_payload(&update);
        tracing::info!(
            target: "trainconf.service",
            stage = "project_configuration.mutate.in",
            project = %project,
            tasks = update.task_configs.len()
        );

        let result = OptimisticMutation::run(
            self.cache.clone(),
            key,
            |current| apply_project_configuration_update(current, &update),
            self.api.update_project_configuration(project, payload),
        )
        .await;

        tracing::info!(
            target: "trainconf.service",
            stage = "project_configuration.mutate.out",
            project = %project,
            ok = result.is_ok()
        );
        result
    }

    /// Optimistically changes the auto-training parameters of one task.
    pub async fn reconfigure_auto_training(
        &self,
        project: &ProjectIdentifier,
        task_id: &str,
        parameters: Vec<KeyValueParameter>,
    ) -> Result<(), MutationError> {
        self.mutate(
            project,
            ProjectConfigurationUpdate::auto_training(task_id, parameters),
        )
        .await
    }
}
