//! Anthropic Messages API client.

use crate::retry::with_retry;
use async_trait::async_trait;
use fresco_core::{GenerateRequest, GenerateResponse, Role};
use fresco_error::{AnthropicErrorKind, ConfigError, FrescoError, ModelsError, ModelsResult};
use fresco_interface::FrescoDriver;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    content: Vec<AnthropicContentBlock>,
}

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier (e.g., "claude-3-5-sonnet-20241022")
    /// * `timeout` - Per-request deadline
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> ModelsResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ModelsError::new(AnthropicErrorKind::Http(format!("Client init failed: {}", e)).into())
        })?;
        debug!("Creating new Anthropic client");
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Creates a client from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env(model: impl Into<String>, timeout: Duration) -> Result<Self, FrescoError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ConfigError::new("ANTHROPIC_API_KEY not set"))?;
        Ok(Self::new(api_key, model, timeout)?)
    }

    /// Sends one request to the Anthropic API.
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn send(&self, request: &AnthropicRequest) -> ModelsResult<AnthropicResponse> {
        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Anthropic API");
                ModelsError::new(
                    AnthropicErrorKind::Http(format!("Request failed: {}", e)).into(),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Anthropic API returned error");
            return Err(ModelsError::new(
                AnthropicErrorKind::ApiError {
                    status: status.as_u16(),
                    message: body,
                }
                .into(),
            ));
        }

        let anthropic_response: AnthropicResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic response");
            ModelsError::new(
                AnthropicErrorKind::Parse(format!("Failed to parse response: {}", e)).into(),
            )
        })?;

        debug!(response_id = %anthropic_response.id, "Received response from Anthropic");
        Ok(anthropic_response)
    }

    /// Converts a Fresco request to an Anthropic API request.
    ///
    /// System messages become the dedicated `system` parameter; the
    /// Messages API rejects them inside the message list.
    fn convert_request(&self, request: &GenerateRequest) -> ModelsResult<AnthropicRequest> {
        let mut system_parts = Vec::new();
        let mut messages = Vec::new();

        for msg in &request.messages {
            match msg.role {
                Role::System => system_parts.push(msg.content.clone()),
                Role::User => messages.push(AnthropicMessage {
                    role: "user",
                    content: msg.content.clone(),
                }),
                Role::Assistant => messages.push(AnthropicMessage {
                    role: "assistant",
                    content: msg.content.clone(),
                }),
            }
        }

        if messages.is_empty() {
            return Err(ModelsError::new(
                AnthropicErrorKind::Conversion(
                    "Request must contain at least one user message".to_string(),
                )
                .into(),
            ));
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        Ok(AnthropicRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
            system,
            messages,
        })
    }

    fn convert_response(response: AnthropicResponse) -> GenerateResponse {
        let text = response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");
        GenerateResponse::new(text)
    }
}

#[async_trait]
impl FrescoDriver for AnthropicClient {
    #[instrument(skip(self, request), fields(provider = "anthropic", model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, FrescoError> {
        let api_request = self.convert_request(request)?;
        let response = with_retry("anthropic", || self.send(&api_request)).await?;
        Ok(Self::convert_response(response))
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
