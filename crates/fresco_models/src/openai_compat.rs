//! Shared client for OpenAI-compatible chat-completions endpoints.

use fresco_core::{GenerateRequest, GenerateResponse, Role};
use fresco_error::{ModelsError, ModelsResult, OpenAiErrorKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Client for any endpoint speaking the OpenAI chat-completions dialect.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: &'static str,
}

impl OpenAiCompatibleClient {
    /// Creates a new OpenAI-compatible client.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: &'static str,
        timeout: Duration,
    ) -> ModelsResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ModelsError::new(OpenAiErrorKind::Http(format!("Client init failed: {}", e)).into())
        })?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            provider,
        })
    }

    /// Provider label this client was built for.
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Configured model identifier.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn convert_request(&self, request: &GenerateRequest) -> ChatRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| ChatMessage {
                role: match msg.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: msg.content.clone(),
            })
            .collect();

        ChatRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Sends one chat-completions request.
    #[instrument(skip(self, request), fields(provider = %self.provider, model = %self.model))]
    pub async fn generate(&self, request: &GenerateRequest) -> ModelsResult<GenerateResponse> {
        let chat_request = self.convert_request(request);
        debug!("Sending chat-completions request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat-completions request");
                ModelsError::new(
                    OpenAiErrorKind::Http(format!("Request failed: {}", e)).into(),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat-completions API returned error");
            let kind = match status.as_u16() {
                429 => OpenAiErrorKind::RateLimit,
                404 => OpenAiErrorKind::ModelNotFound(chat_request.model),
                400 => OpenAiErrorKind::InvalidRequest(body),
                code => OpenAiErrorKind::ApiError {
                    status: code,
                    message: body,
                },
            };
            return Err(ModelsError::new(kind.into()));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat-completions response");
            ModelsError::new(
                OpenAiErrorKind::Parse(format!("Failed to parse response: {}", e)).into(),
            )
        })?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ModelsError::new(
                    OpenAiErrorKind::Parse("Response contained no choices".to_string()).into(),
                )
            })?;

        Ok(GenerateResponse::new(text))
    }
}
