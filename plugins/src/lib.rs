//! HTTP implementation of the `trainconf-core` configuration API.

pub mod api;
pub mod factory;
pub mod http;
