//! Facial-emotion description and coping advice.
//!
//! Unlike playlist generation these features have no fallback: failures
//! surface as [`PipelineError`] and the API answers with a 500.

use std::sync::Arc;

use moodtunes_core::prompts::{advice_prompt, ADVICE_SYSTEM, EMOTION_IMAGE_INSTRUCTION};
use moodtunes_llm::{ChatMessage, ChatModel, ChatRequest, LlmError, ModelKind};
use serde_json::Value;

use crate::PipelineError;

const IMAGE_MAX_TOKENS: u32 = 150;

/// Re-wrap a bare base64 payload or any `data:` URL as a JPEG data URL.
pub fn as_jpeg_data_url(image: &str) -> String {
    let payload = match image.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => image,
    };
    format!("data:image/jpeg;base64,{}", payload.trim())
}

#[derive(Clone)]
pub struct EmotionAnalyzer {
    llm: Arc<dyn ChatModel>,
}

impl EmotionAnalyzer {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self { llm }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_configured()
    }

    /// Describe the emotion shown in one base64 image.
    pub async fn describe_image(&self, image: &str) -> Result<String, PipelineError> {
        let request = ChatRequest {
            model: ModelKind::Vision,
            messages: vec![ChatMessage::user_with_image(
                EMOTION_IMAGE_INSTRUCTION,
                as_jpeg_data_url(image),
            )],
            temperature: None,
            max_tokens: Some(IMAGE_MAX_TOKENS),
            json_mode: false,
        };

        let description = self.llm.complete(&request).await?;
        let description = description.trim();
        if description.is_empty() {
            return Err(LlmError::EmptyResponse.into());
        }
        tracing::info!(chars = description.len(), "Emotion description received");
        Ok(description.to_string())
    }

    /// Two or three coping strategies for `feeling`.
    pub async fn advice(&self, feeling: &str) -> Result<Vec<String>, PipelineError> {
        let request = ChatRequest::chat(ADVICE_SYSTEM, advice_prompt(feeling)).json();
        let reply = self.llm.complete(&request).await?;
        parse_advice(&reply)
    }
}

fn parse_advice(reply: &str) -> Result<Vec<String>, PipelineError> {
    let value: Value = serde_json::from_str(reply)
        .map_err(|e| PipelineError::InvalidResponse(format!("advice is not JSON: {e}")))?;
    let list = value
        .get("advice_list")
        .and_then(Value::as_array)
        .ok_or_else(|| PipelineError::InvalidResponse("missing 'advice_list' array".into()))?;

    list.iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                PipelineError::InvalidResponse("'advice_list' must contain strings".into())
            })
        })
        .collect()
}
