//! Request and response types for LLM generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// A generation request sent through a provider driver.
///
/// # Examples
///
/// ```
/// use fresco_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(100u32)
///     .temperature(0.7f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(100));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(setter(strip_option))]
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    #[builder(setter(strip_option))]
    pub temperature: Option<f32>,
    /// Model identifier to use
    #[builder(setter(strip_option))]
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use fresco_core::GenerateResponse;
///
/// let response = GenerateResponse::new("Hello! How can I help?");
/// assert!(response.text.contains("help"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text from the model
    pub text: String,
}

impl GenerateResponse {
    /// Create a response from generated text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
