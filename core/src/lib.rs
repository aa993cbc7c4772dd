//! Configurable-parameter synchronization for the training configuration API.
//!
//! Server DTOs are mapped into typed domain trees, cached per query key and
//! updated optimistically through [`mutation::OptimisticMutation`].

pub mod api;
pub mod config;
pub mod configuration;
pub mod context;
pub mod dto;
pub mod error;
pub mod identifiers;
pub mod logging;
pub mod mutation;
pub mod parameters;
pub mod query;
pub mod service;
