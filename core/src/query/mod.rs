//! In-memory query cache keyed by [`QueryKey`].

mod cache;
mod client;
mod events;
mod key;

pub use cache::QueryCache;
pub use client::QueryClient;
pub use events::CacheEvent;
pub use key::QueryKey;
