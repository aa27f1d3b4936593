//! Single-shot mood classification.

use std::sync::Arc;

use moodtunes_core::mood::MoodCategory;
use moodtunes_core::prompts::{classification_prompt, classification_system};
use moodtunes_llm::{ChatModel, ChatRequest};

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 20;

/// Maps free-text mood descriptions onto [`MoodCategory`].
#[derive(Clone)]
pub struct MoodCategorizer {
    llm: Arc<dyn ChatModel>,
}

impl MoodCategorizer {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self { llm }
    }

    /// Classify `text`. Never fails: empty input, call errors and any
    /// label outside the fixed set all yield [`MoodCategory::Other`].
    pub async fn categorize(&self, text: &str) -> MoodCategory {
        if text.trim().is_empty() {
            return MoodCategory::Other;
        }

        let request = ChatRequest::chat(classification_system(), classification_prompt(text))
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS);

        match self.llm.complete(&request).await {
            Ok(reply) => {
                let label = reply.trim();
                MoodCategory::from_label(label).unwrap_or_else(|| {
                    tracing::warn!(label, mood = text, "Unexpected mood category; using Other");
                    MoodCategory::Other
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Mood categorization failed");
                MoodCategory::Other
            }
        }
    }
}
