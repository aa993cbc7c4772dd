use std::sync::Arc;

use super::r#trait::ConfigurationApi;
use crate::error::{MutationError, QueryError};
use crate::identifiers::{ModelIdentifier, ProjectIdentifier};
use crate::mutation::OptimisticMutation;
use crate::parameters::{
    get_config_parameters_entity, get_model_config_entity, get_reconfigure_parameters_dto,
    reset_parameters_to_default, update_selected_parameter, ConfigurableParametersTaskChain,
    ConfigurableParametersTree, ParameterPath, ParameterValue,
};
use crate::query::{QueryCache, QueryKey};

/// Configurable parameters of a project (all task chains) and of single
/// models, both held in one tree cache.
#[derive(Clone)]
pub struct ConfigParametersService {
    api: Arc<dyn ConfigurationApi>,
    cache: QueryCache<ConfigurableParametersTree>,
}

impl ConfigParametersService {
    pub fn new(
        api: Arc<dyn ConfigurationApi>,
        cache: QueryCache<ConfigurableParametersTree>,
    ) -> Self {
        Self { api, cache }
    }

    async fn fetch(
        &self,
        project: &ProjectIdentifier,
    ) -> Result<ConfigurableParametersTree, QueryError> {
        let dto = self
            .api
            .get_config_parameters(project)
            .await
            .map_err(QueryError::Fetch)?;
        Ok(get_config_parameters_entity(dto)?)
    }

    async fn fetch_model(
        &self,
        model: &ModelIdentifier,
    ) -> Result<ConfigurableParametersTree, QueryError> {
        let dto = self
            .api
            .get_model_config_parameters(model)
            .await
            .map_err(QueryError::Fetch)?;
        Ok(vec![Arc::new(get_model_config_entity(dto)?)])
    }

    pub async fn query(
        &self,
        project: &ProjectIdentifier,
    ) -> Result<ConfigurableParametersTree, QueryError> {
        let key = QueryKey::config_parameters(project);
        self.cache
            .ensure_query_data(&key, || self.fetch(project))
            .await
    }

    /// A model's hyper-parameters as a single-entry tree.
    pub async fn query_model(
        &self,
        model: &ModelIdentifier,
    ) -> Result<ConfigurableParametersTree, QueryError> {
        let key = QueryKey::model_config_parameters(model);
        self.cache
            .ensure_query_data(&key, || self.fetch_model(model))
            .await
    }

    /// Replaces the cached tree with `tree` and submits it.
    pub async fn reconfigure(
        &self,
        project: &ProjectIdentifier,
        tree: ConfigurableParametersTree,
    ) -> Result<(), MutationError> {
        let payload = get_reconfigure_parameters_dto(&tree);
        tracing::info!(
            target: "trainconf.service",
            stage = "config_parameters.reconfigure.in",
            project = %project,
            global = payload.global.len(),
            tasks = payload.task_chain.len()
        );
        OptimisticMutation::run(
            self.cache.clone(),
            QueryKey::config_parameters(project),
            move |_| tree,
            self.api.reconfigure_parameters(project, payload),
        )
        .await
    }

    /// Sets one parameter and submits the resulting tree. An unknown path
    /// submits the tree unchanged.
    pub async fn update_parameter(
        &self,
        project: &ProjectIdentifier,
        path: &ParameterPath,
        value: &ParameterValue,
    ) -> Result<(), MutationError> {
        self.reconfigure_with(project, |tree| update_selected_parameter(tree, path, value))
            .await
    }

    /// Puts every parameter back to its default and submits the tree.
    pub async fn reset_to_defaults(
        &self,
        project: &ProjectIdentifier,
    ) -> Result<(), MutationError> {
        self.reconfigure_with(project, reset_parameters_to_default)
            .await
    }

    async fn reconfigure_with<F>(
        &self,
        project: &ProjectIdentifier,
        update: F,
    ) -> Result<(), MutationError>
    where
        F: Fn(&[Arc<ConfigurableParametersTaskChain>]) -> ConfigurableParametersTree,
    {
        let current = self.query(project).await?;
        let payload = get_reconfigure_parameters_dto(&update(current.as_slice()));
        OptimisticMutation::run(
            self.cache.clone(),
            QueryKey::config_parameters(project),
            |cached: &ConfigurableParametersTree| update(cached.as_slice()),
            self.api.reconfigure_parameters(project, payload),
        )
        .await
    }
}
