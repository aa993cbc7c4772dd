use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::identifiers::ProjectIdentifier;
use crate::query::QueryClient;
use crate::service::{
    ConfigParametersService, ConfigurationApi, ProjectConfigurationService,
    TrainingConfigurationService,
};

/// Builds the remote API from configuration; implemented outside this crate.
#[async_trait::async_trait]
pub trait ApiFactory: Send + Sync {
    async fn build_api(&self, cfg: &AppConfig) -> Result<Arc<dyn ConfigurationApi>, ConfigError>;
}

#[derive(Clone)]
pub struct Services {
    pub project_configuration: ProjectConfigurationService,
    pub training_configuration: TrainingConfigurationService,
    pub config_parameters: ConfigParametersService,
}

/// Configuration, the shared query caches and the services built on them.
#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    queries: QueryClient,
    api: Arc<dyn ConfigurationApi>,
}

impl AppContext {
    pub async fn new(cfg: AppConfig, factory: &dyn ApiFactory) -> Result<Self, ConfigError> {
        let api = factory.build_api(&cfg).await?;
        Ok(Self::with_api(cfg, api))
    }

    pub fn with_api(cfg: AppConfig, api: Arc<dyn ConfigurationApi>) -> Self {
        let queries = QueryClient::new(cfg.cache.event_channel_capacity);
        tracing::debug!(
            target: "trainconf.context",
            api = api.name(),
            base_url = %cfg.server.base_url
        );
        Self { cfg, queries, api }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn api(&self) -> Arc<dyn ConfigurationApi> {
        Arc::clone(&self.api)
    }

    pub fn project_identifier(&self, project_id: impl Into<String>) -> ProjectIdentifier {
        self.cfg.project(project_id)
    }

    pub fn services(&self) -> Services {
        Services {
            project_configuration: ProjectConfigurationService::new(
                self.api(),
                self.queries.project_configuration.clone(),
            ),
            training_configuration: TrainingConfigurationService::new(
                self.api(),
                self.queries.training_configuration.clone(),
            ),
            config_parameters: ConfigParametersService::new(
                self.api(),
                self.queries.config_parameters.clone(),
            ),
        }
    }
}
