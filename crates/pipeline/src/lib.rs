//! The mood-to-playlist pipeline.
//!
//! Control flow for one request:
//!
//! 1. [`categorizer::MoodCategorizer`] labels the mood text.
//! 2. [`generator::PlaylistGenerator`] drafts a playlist (or the fixed fallback).
//! 3. [`assembly::verify_tracks`] checks each draft against the catalog.
//! 4. [`service::MoodPlaylistService`] persists everything through a
//!    [`store::PlaylistStore`], deleting the mood entry if any step fails.
//!
//! The specialized-playlist job ([`specialized`]) reuses the generator
//! without catalog verification.

pub mod assembly;
pub mod categorizer;
pub mod emotion;
pub mod generator;
pub mod replacement;
pub mod service;
pub mod specialized;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

use moodtunes_llm::LlmError;

/// Failures that escape the pipeline.
///
/// Upstream AI and catalog problems are absorbed into fallbacks wherever a
/// fallback exists; only the features without one surface `Llm` or
/// `InvalidResponse`.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Unusable LLM response: {0}")]
    InvalidResponse(String),
}

impl PipelineError {
    /// The LLM has no credentials configured.
    pub fn is_llm_not_configured(&self) -> bool {
        matches!(self, PipelineError::Llm(LlmError::NotConfigured))
    }
}
