//! Trait definitions for LLM provider backends.

use async_trait::async_trait;
use fresco_core::{GenerateRequest, GenerateResponse};
use fresco_error::FrescoResult;

/// Core trait that all LLM provider backends implement.
///
/// This is the single capability the pipeline consumes: synchronous text
/// generation over plain UTF-8 request and response bodies.
#[async_trait]
pub trait FrescoDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> FrescoResult<GenerateResponse>;

    /// Provider name (e.g., "anthropic", "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "claude-sonnet-4-20250514").
    fn model_name(&self) -> &str;
}
