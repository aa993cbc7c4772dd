#[allow(clippy::module_inception)]
pub mod error;
pub mod mapping;
pub mod query;

pub use error::ConfigError;
pub use mapping::{MappingError, PathError};
pub use query::{MutationError, QueryError};
