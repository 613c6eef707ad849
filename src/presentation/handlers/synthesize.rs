use std::path::Path;

use serde::Serialize;

use crate::application::services::ProviderAttempt;
use crate::domain::{EngineId, EnginePreference, SynthesisRequest};
use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::error_response::ErrorResponse;

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub success: bool,
    pub engine_used: EngineId,
    pub output: Option<String>,
    pub audio_bytes: usize,
    pub sample_rate: Option<u32>,
    pub duration_secs: Option<f32>,
    pub error: Option<ErrorResponse>,
    pub attempts: Vec<ProviderAttempt>,
}

#[tracing::instrument(skip(state, text), fields(text = %sanitize_text(text)))]
pub async fn synthesize_handler(
    state: &AppState,
    text: &str,
    voice: Option<String>,
    engine: &str,
    output: &Path,
) -> SynthesizeResponse {
    let voice = voice.or_else(|| Some(state.settings.speech.default_voice.clone()));
    let request = SynthesisRequest::new(text, voice, EnginePreference::from(engine));

    let result = state.resolver.synthesize(&request).await;

    let mut response = SynthesizeResponse {
        success: result.success(),
        engine_used: result.engine_used.clone(),
        output: None,
        audio_bytes: 0,
        sample_rate: None,
        duration_secs: None,
        error: result.error().map(ErrorResponse::from),
        attempts: result.attempts.clone(),
    };

    let Some(speech) = result.payload() else {
        return response;
    };

    if let Err(e) = tokio::fs::write(output, &speech.wav).await {
        tracing::error!(error = %e, path = %output.display(), "Failed to write synthesized audio");
        response.success = false;
        response.error = Some(ErrorResponse::io("writing output", &e));
        return response;
    }

    tracing::info!(
        path = %output.display(),
        bytes = speech.wav.len(),
        engine = %result.engine_used,
        "Synthesized audio written"
    );

    response.output = Some(output.display().to_string());
    response.audio_bytes = speech.wav.len();
    response.sample_rate = Some(speech.sample_rate);
    response.duration_secs = Some(speech.duration_secs());
    response
}
