//! Handler for the public `/emotion` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64 images, optionally as data URLs. Exactly one is accepted.
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub description: String,
}

/// POST /api/v1/emotion/analyze
pub async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    if !state.emotion.is_configured() {
        return Err(AppError::Upstream(
            "OpenAI API key not configured on server for emotion analysis.".into(),
        ));
    }

    let [image] = input.images.as_slice() else {
        return Err(AppError::BadRequest(
            "Exactly one image is required for OpenAI analysis.".into(),
        ));
    };

    let description = state.emotion.describe_image(image).await.map_err(|e| {
        tracing::error!(error = %e, "Emotion analysis failed");
        AppError::Upstream("Failed to get analysis from OpenAI.".into())
    })?;

    Ok(Json(AnalyzeResponse { description }))
}
