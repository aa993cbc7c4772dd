use thiserror::Error;

use super::mapping::MappingError;
use crate::mutation::TransitionError;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("fetch failed: {0}")]
    Fetch(anyhow::Error),

    #[error("mapping failed: {0}")]
    Mapping(#[from] MappingError),

    #[error("query {0} was cancelled")]
    Cancelled(String),
}

#[derive(Error, Debug)]
pub enum MutationError {
    /// The remote write failed; the cache has already been rolled back.
    #[error("request failed: {0}")]
    Request(anyhow::Error),

    #[error("could not read current data: {0}")]
    Query(#[from] QueryError),

    #[error("mutation phase error: {0}")]
    Transition(#[from] TransitionError),
}
