use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Url, multipart};
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    AudioEncoding, ProviderError, RecognizedSpeech, SpeechRecognizer, SpeechSynthesizer,
    SynthesizedAudio,
};

pub const RIVA_ENGINE: &str = "riva";

const TTS_SAMPLE_RATE_HZ: u32 = 22_050;
const ASR_SAMPLE_RATE_HZ: u32 = 16_000;
const NVIDIA_CLOUD_DOMAIN: &str = "nvidia.com";

/// NVIDIA Riva speech services over HTTP, local or NVIDIA-hosted.
pub struct RivaSpeechEngine {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    language_code: String,
}

impl RivaSpeechEngine {
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        language_code: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let base_url = normalize_endpoint(endpoint)?;
        let api_key = api_key.filter(|k| !k.trim().is_empty());

        let url = Url::parse(&base_url).map_err(|e| {
            ProviderError::InitializationFailed(format!("invalid endpoint '{}': {}", endpoint, e))
        })?;
        let is_cloud = url
            .host_str()
            .is_some_and(|h| h.ends_with(NVIDIA_CLOUD_DOMAIN));
        if is_cloud && api_key.is_none() {
            return Err(ProviderError::InitializationFailed(
                "api key required for the NVIDIA cloud endpoint".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::InitializationFailed(format!("http client: {}", e)))?;

        tracing::info!(
            endpoint = %base_url,
            cloud = is_cloud,
            authenticated = api_key.is_some(),
            "Riva speech engine configured"
        );

        Ok(Self {
            client,
            base_url,
            api_key,
            language_code: language_code.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[derive(Serialize)]
struct RivaSynthesizeRequest<'a> {
    text: &'a str,
    voice: &'a str,
    language_code: &'a str,
    encoding: &'static str,
    sample_rate_hz: u32,
}

#[derive(Deserialize)]
struct RivaRecognizeResponse {
    #[serde(default)]
    results: Vec<RivaRecognitionResult>,
}

#[derive(Deserialize)]
struct RivaRecognitionResult {
    #[serde(default)]
    alternatives: Vec<RivaAlternative>,
}

#[derive(Deserialize)]
struct RivaAlternative {
    #[serde(default)]
    transcript: String,
    confidence: Option<f32>,
}

#[async_trait]
impl SpeechSynthesizer for RivaSpeechEngine {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<SynthesizedAudio, ProviderError> {
        let url = format!("{}/v1/riva/speech_synthesis/synthesize", self.base_url);
        let body = RivaSynthesizeRequest {
            text,
            voice,
            language_code: &self.language_code,
            encoding: "LINEAR_PCM",
            sample_rate_hz: TTS_SAMPLE_RATE_HZ,
        };

        tracing::debug!(url = %url, voice = %voice, "Sending synthesis request to Riva");

        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequestFailed(format!("request: {}", e)))?;

        let response = check_status(response).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response
            .bytes()
            .await
            .map_err(|e| ProviderError::ApiRequestFailed(format!("body: {}", e)))?
            .to_vec();

        if data.is_empty() {
            return Err(ProviderError::EmptyResult);
        }

        let encoding = detect_encoding(content_type.as_deref(), &data, TTS_SAMPLE_RATE_HZ);
        tracing::info!(bytes = data.len(), encoding = ?encoding, "Riva synthesis completed");

        Ok(SynthesizedAudio { data, encoding })
    }
}

#[async_trait]
impl SpeechRecognizer for RivaSpeechEngine {
    async fn recognize(&self, audio: &[u8]) -> Result<RecognizedSpeech, ProviderError> {
        let url = format!("{}/v1/riva/speech_recognition/recognize", self.base_url);

        let file_part = multipart::Part::bytes(audio.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| ProviderError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("language_code", self.language_code.clone())
            .text("sample_rate_hz", ASR_SAMPLE_RATE_HZ.to_string())
            .text("max_alternatives", "1")
            .text("enable_automatic_punctuation", "true")
            .part("file", file_part);

        tracing::debug!(url = %url, bytes = audio.len(), "Sending audio to Riva ASR");

        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequestFailed(format!("request: {}", e)))?;

        let response = check_status(response).await?;

        let result: RivaRecognizeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("parse response: {}", e)))?;

        let best = result
            .results
            .into_iter()
            .next()
            .and_then(|r| r.alternatives.into_iter().next())
            .ok_or(ProviderError::EmptyResult)?;

        tracing::info!(
            chars = best.transcript.len(),
            confidence = ?best.confidence,
            "Riva transcription completed"
        );

        Ok(RecognizedSpeech {
            transcript: best.transcript,
            confidence: best.confidence,
        })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ProviderError::UnexpectedStatus { status, body })
}

fn normalize_endpoint(endpoint: &str) -> Result<String, ProviderError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ProviderError::InitializationFailed(
            "endpoint is empty".to_string(),
        ));
    }

    if trimmed.contains("://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("http://{}", trimmed))
    }
}

/// Decides how to read a synthesis body: WAV by header or content type,
/// raw LINEAR_PCM when untyped or declared as PCM, a foreign container otherwise.
fn detect_encoding(content_type: Option<&str>, data: &[u8], sample_rate: u32) -> AudioEncoding {
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
        return AudioEncoding::Wav;
    }

    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_lowercase())
        .unwrap_or_default();

    match mime.as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => AudioEncoding::Wav,
        "" | "application/octet-stream" | "audio/l16" | "audio/pcm" | "audio/raw" => {
            AudioEncoding::LinearPcm {
                sample_rate,
                channels: 1,
            }
        }
        other => AudioEncoding::Other(other.to_string()),
    }
}
