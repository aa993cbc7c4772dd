mod client;
mod error;

pub use client::HttpClient;
pub use error::ApiHttpError;
