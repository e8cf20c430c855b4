//! LLM provider integrations for Fresco.
//!
//! Two providers back the generation pipeline: [`AnthropicClient`] for
//! narrative-leaning content and [`OpenAiClient`] (an OpenAI-compatible
//! chat-completions client) for structured, conversion-leaning content.
//! Both are plain request/response `reqwest` clients with transient-error
//! retry; the primary/backup failover between them lives in the pipeline,
//! not here.

#![forbid(unsafe_code)]

mod anthropic;
mod openai;
mod openai_compat;
mod retry;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;
pub use openai_compat::OpenAiCompatibleClient;
