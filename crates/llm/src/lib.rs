//! Chat-completion client used by every AI feature.
//!
//! [`ChatModel`] is the seam the pipeline depends on; [`OpenAiClient`] is
//! the production implementation speaking the OpenAI-compatible
//! `/chat/completions` protocol.

pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::{LlmConfig, OpenAiClient};
pub use types::{ChatMessage, ChatRequest, ContentPart, MessageContent, ModelKind, Role};

/// Errors from the LLM layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key is configured; no request was sent.
    #[error("LLM API key is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("LLM API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response carried no message content.
    #[error("LLM response had no content")]
    EmptyResponse,
}

/// A chat-completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Whether requests can be sent at all.
    fn is_configured(&self) -> bool {
        true
    }

    /// Run one completion and return the first choice's text content.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}
