use tokio::sync::broadcast;

use super::cache::QueryCache;
use super::events::CacheEvent;
use crate::configuration::{ProjectConfiguration, TrainingConfiguration};
use crate::parameters::ConfigurableParametersTree;

/// The caches of every configuration query, sharing one event channel.
///
/// Project and model configurable parameters live in the same cache under
/// different keys.
#[derive(Clone)]
pub struct QueryClient {
    pub project_configuration: QueryCache<ProjectConfiguration>,
    pub training_configuration: QueryCache<TrainingConfiguration>,
    pub config_parameters: QueryCache<ConfigurableParametersTree>,
    event_tx: broadcast::Sender<CacheEvent>,
}

impl QueryClient {
    pub fn new(event_channel_capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(event_channel_capacity.max(1));
        Self {
            project_configuration: QueryCache::new(event_tx.clone()),
            training_configuration: QueryCache::new(event_tx.clone()),
            config_parameters: QueryCache::new(event_tx.clone()),
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.event_tx.subscribe()
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(256)
    }
}
