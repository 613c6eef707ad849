use std::path::Path;

use serde::Serialize;

use crate::application::services::ProviderAttempt;
use crate::domain::{EngineId, EnginePreference, TranscriptionRequest};
use crate::presentation::state::AppState;

use super::error_response::ErrorResponse;

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub success: bool,
    pub transcript: String,
    pub confidence: f32,
    pub engine_used: EngineId,
    pub error: Option<ErrorResponse>,
    pub attempts: Vec<ProviderAttempt>,
}

#[tracing::instrument(skip(state))]
pub async fn transcribe_handler(state: &AppState, input: &Path, engine: &str) -> TranscribeResponse {
    let audio = match tokio::fs::read(input).await {
        Ok(audio) => audio,
        Err(e) => {
            tracing::error!(error = %e, path = %input.display(), "Failed to read audio file");
            return TranscribeResponse {
                success: false,
                transcript: String::new(),
                confidence: 0.0,
                engine_used: EngineId::none(),
                error: Some(ErrorResponse::io("reading input", &e)),
                attempts: Vec::new(),
            };
        }
    };

    tracing::debug!(bytes = audio.len(), "Audio file loaded");

    let request = TranscriptionRequest::new(audio, EnginePreference::from(engine));
    let result = state.resolver.transcribe(&request).await;

    let (transcript, confidence) = result
        .payload()
        .map(|t| (t.text.clone(), t.confidence))
        .unwrap_or_default();

    TranscribeResponse {
        success: result.success(),
        transcript,
        confidence,
        engine_used: result.engine_used.clone(),
        error: result.error().map(ErrorResponse::from),
        attempts: result.attempts,
    }
}
