//! Error types for the Fresco content pipeline.
//!
//! Each concern gets its own error struct carrying a kind enum plus the
//! source location where the error was raised. The workspace-level
//! [`FrescoError`] wraps every concern behind one boxed kind so call sites
//! can use `?` across crate boundaries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod builder;
mod config;
mod error;
mod http;
mod json;
mod models;
mod pipeline;
mod storage;

pub use backend::BackendError;
pub use builder::BuilderError;
pub use config::ConfigError;
pub use error::{FrescoError, FrescoErrorKind, FrescoResult};
pub use http::HttpError;
pub use json::JsonError;
pub use models::{
    AnthropicErrorKind, ModelsError, ModelsErrorKind, ModelsResult, OpenAiErrorKind,
};
pub use pipeline::{PipelineError, PipelineErrorKind, PipelineResult};
pub use storage::{StorageError, StorageErrorKind, StorageResult};
