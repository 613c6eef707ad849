use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Url, multipart};
use serde::Deserialize;

use crate::application::ports::{ProviderError, RecognizedSpeech, SpeechRecognizer};

pub const WHISPER_ENGINE: &str = "whisper";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Local Whisper server speaking the OpenAI `/audio/transcriptions` dialect.
pub struct WhisperEngine {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl WhisperEngine {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            ProviderError::InitializationFailed(format!("invalid base url '{}': {}", base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::InitializationFailed(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Succeeds when the server answers at all; the model list is not inspected.
    pub async fn probe(&self) -> Result<(), ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| ProviderError::InitializationFailed(format!("unreachable: {}", e)))?;

        tracing::debug!(url = %url, status = %response.status(), "Whisper server reachable");
        Ok(())
    }
}

#[derive(Deserialize)]
struct WhisperTranscriptionResponse {
    text: String,
}

#[async_trait]
impl SpeechRecognizer for WhisperEngine {
    async fn recognize(&self, audio: &[u8]) -> Result<RecognizedSpeech, ProviderError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| ProviderError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to Whisper server");

        let mut request = self.client.post(&url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::UnexpectedStatus { status, body });
        }

        let result: WhisperTranscriptionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("parse response: {}", e)))?;

        tracing::info!(
            chars = result.text.len(),
            "Whisper transcription completed"
        );

        Ok(RecognizedSpeech {
            transcript: result.text,
            confidence: None,
        })
    }
}
