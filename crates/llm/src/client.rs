//! OpenAI-compatible chat-completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, ChatRequest, ModelKind};
use crate::{ChatModel, LlmError};

/// LLM connection settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` disables every LLM call; callers fall back.
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub vision_model: String,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default                     |
    /// |-----------------------|-----------------------------|
    /// | `OPENAI_API_KEY`      | unset (LLM disabled)        |
    /// | `OPENAI_BASE_URL`     | `https://api.openai.com/v1` |
    /// | `OPENAI_CHAT_MODEL`   | `gpt-4o-mini`               |
    /// | `OPENAI_VISION_MODEL` | `gpt-4o`                    |
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into())
            .trim_end_matches('/')
            .to_string();

        let chat_model =
            std::env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        let vision_model =
            std::env::var("OPENAI_VISION_MODEL").unwrap_or_else(|_| "gpt-4o".into());

        Self {
            api_key,
            base_url,
            chat_model,
            vision_model,
        }
    }
}

/// Wire body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }

    fn model_name(&self, kind: ModelKind) -> &str {
        match kind {
            ModelKind::Chat => &self.config.chat_model,
            ModelKind::Vision => &self.config.vision_model,
        }
    }

    fn body<'a>(&'a self, request: &'a ChatRequest) -> CompletionBody<'a> {
        CompletionBody {
            model: self.model_name(request.model),
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, otherwise capture
    /// the status and body in [`LlmError::Api`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// First choice's content, or [`LlmError::EmptyResponse`].
fn first_content(response: CompletionResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}

#[async_trait]
impl ChatModel for OpenAiClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::NotConfigured)?;
        let body = self.body(request);

        tracing::debug!(
            model = body.model,
            json_mode = request.json_mode,
            messages = request.messages.len(),
            "Sending chat completion",
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        first_content(response.json::<CompletionResponse>().await?)
    }
}
