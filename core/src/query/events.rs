use chrono::{DateTime, Utc};
use serde::Serialize;

use super::key::QueryKey;

/// Broadcast by [`super::QueryCache`] whenever an entry changes state.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CacheEvent {
    /// New data was written, either fetched or set directly.
    Updated {
        key: QueryKey,
        timestamp: DateTime<Utc>,
    },
    Invalidated {
        key: QueryKey,
        timestamp: DateTime<Utc>,
    },
    /// In-flight fetches were superseded; their results will be dropped.
    Cancelled {
        key: QueryKey,
        in_flight: usize,
        timestamp: DateTime<Utc>,
    },
    /// A failed mutation put the snapshot back.
    RolledBack {
        key: QueryKey,
        timestamp: DateTime<Utc>,
    },
}

impl CacheEvent {
    pub fn key(&self) -> &QueryKey {
        match self {
            Self::Updated { key, .. }
            | Self::Invalidated { key, .. }
            | Self::Cancelled { key, .. }
            | Self::RolledBack { key, .. } => key,
        }
    }
}
