//! ApiFactory implementation: builds the remote configuration API from `AppConfig`.
use std::sync::Arc;

use async_trait::async_trait;
use trainconf_core::api::{ApiFactory, AppConfig, ConfigError, ConfigurationApi};

use crate::api::HttpConfigurationApi;

pub fn build_api(cfg: &AppConfig) -> anyhow::Result<Arc<dyn ConfigurationApi>> {
    let server = &cfg.server;
    if server.base_url.trim().is_empty() {
        anyhow::bail!("server.base_url is empty");
    }
    tracing::debug!(
        target: "trainconf.factory",
        base_url = %server.base_url,
        timeout_ms = server.timeout_ms,
        auth = !server.api_key.trim().is_empty(),
        "building http configuration api"
    );
    Ok(Arc::new(HttpConfigurationApi::new(
        server.base_url.clone(),
        server.api_key.clone(),
        server.timeout_ms,
    )?))
}

#[derive(Default)]
pub struct PluginApiFactory;

#[async_trait]
impl ApiFactory for PluginApiFactory {
    async fn build_api(&self, cfg: &AppConfig) -> Result<Arc<dyn ConfigurationApi>, ConfigError> {
        Ok(build_api(cfg)?)
    }
}
