//! OpenAI chat-completions driver.

use crate::openai_compat::OpenAiCompatibleClient;
use crate::retry::with_retry;
use async_trait::async_trait;
use fresco_core::{GenerateRequest, GenerateResponse};
use fresco_error::{ConfigError, FrescoError, ModelsResult};
use fresco_interface::FrescoDriver;
use std::time::Duration;
use tracing::instrument;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API driver over the shared chat-completions client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    inner: OpenAiCompatibleClient,
}

impl OpenAiClient {
    /// Creates a new OpenAI driver with an explicit API key.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> ModelsResult<Self> {
        let inner = OpenAiCompatibleClient::new(
            api_key,
            model,
            OPENAI_API_URL,
            "openai",
            timeout,
        )?;
        Ok(Self { inner })
    }

    /// Creates a driver from the `OPENAI_API_KEY` environment variable.
    pub fn from_env(model: impl Into<String>, timeout: Duration) -> Result<Self, FrescoError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::new("OPENAI_API_KEY not set"))?;
        Ok(Self::new(api_key, model, timeout)?)
    }
}

#[async_trait]
impl FrescoDriver for OpenAiClient {
    #[instrument(skip(self, request), fields(provider = "openai", model = %self.inner.model_name()))]
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, FrescoError> {
        let response = with_retry("openai", || self.inner.generate(request)).await?;
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
