use std::sync::Arc;

use super::r#trait::ConfigurationApi;
use crate::configuration::{
    apply_training_configuration_update, get_training_configuration_entity,
    get_training_configuration_upload_payload, TrainingConfiguration, TrainingConfigurationUpdate,
};
use crate::error::{MutationError, QueryError};
use crate::identifiers::{ProjectIdentifier, TrainingConfigurationQuery};
use crate::mutation::OptimisticMutation;
use crate::query::{QueryCache, QueryKey};

#[derive(Clone)]
pub struct TrainingConfigurationService {
    api: Arc<dyn ConfigurationApi>,
    cache: QueryCache<TrainingConfiguration>,
}

impl TrainingConfigurationService {
    pub fn new(api: Arc<dyn ConfigurationApi>, cache: QueryCache<TrainingConfiguration>) -> Self {
        Self { api, cache }
    }

    async fn fetch(
        &self,
        project: &ProjectIdentifier,
        query: &TrainingConfigurationQuery,
    ) -> Result<TrainingConfiguration, QueryError> {
        let dto = self
            .api
            .get_training_configuration(project, query)
            .await
            .map_err(QueryError::Fetch)?;
        Ok(get_training_configuration_entity(dto)?)
    }

    pub async fn query(
        &self,
        project: &ProjectIdentifier,
        query: &TrainingConfigurationQuery,
    ) -> Result<TrainingConfiguration, QueryError> {
        let key = QueryKey::training_configuration(project, query);
        self.cache
            .ensure_query_data(&key, || self.fetch(project, query))
            .await
    }

    /// The cache entry is the one selected by the update's task and model
    /// manifest.
    pub async fn mutate(
        &self,
        project: &ProjectIdentifier,
        update: TrainingConfigurationUpdate,
    ) -> Result<(), MutationError> {
        let query = TrainingConfigurationQuery {
            task_id: update.task_id.clone(),
            model_manifest_id: update.model_manifest_id.clone(),
        };
        let key = QueryKey::training_configuration(project, &query);
        let payload = get_training_configuration_upload_payload(&update);
        tracing::info!(
            target: "trainconf.service",
            stage = "training_configuration.mutate.in",
            key = %key,
            sections = update.sections.len()
        );

        OptimisticMutation::run(
            self.cache.clone(),
            key,
            |current| apply_training_configuration_update(current, &update),
            self.api
                .update_training_configuration(project, &query, payload),
        )
        .await
    }
}
