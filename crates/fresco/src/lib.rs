//! Fresco facade: CLI, configuration, and observability wiring.

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod fixtures;
pub mod observability;

pub use cli::{Cli, Commands};
pub use config::FrescoConfig;
pub use observability::{ObservabilityConfig, init_observability};
