use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;
use uuid::Uuid;

use crate::application::ports::ProviderError;
use crate::domain::{
    Capability, EngineId, EnginePreference, SynthesisRequest, SynthesizedSpeech, Transcript,
    TranscriptionRequest,
};

use super::engine_registry::EngineRegistry;
use super::operation_result::OperationResult;
use super::result_normalizer::{NormalizeError, normalize_audio, normalize_transcript};
use super::speech_error::{ProviderAttempt, SpeechError};

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Picks and invokes providers for synthesis and transcription.
///
/// An explicit engine is attempted alone. `auto` walks the registry's priority
/// list for the operation and stops at the first provider that succeeds.
pub struct FallbackResolver {
    registry: Arc<EngineRegistry>,
    provider_timeout: Duration,
    max_audio_bytes: usize,
}

impl FallbackResolver {
    pub fn new(registry: Arc<EngineRegistry>, provider_timeout: Duration) -> Self {
        Self {
            registry,
            provider_timeout,
            max_audio_bytes: DEFAULT_MAX_AUDIO_BYTES,
        }
    }

    pub fn with_max_audio_bytes(mut self, max_audio_bytes: usize) -> Self {
        self.max_audio_bytes = max_audio_bytes;
        self
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub async fn synthesize(&self, request: &SynthesisRequest) -> OperationResult<SynthesizedSpeech> {
        let span = tracing::info_span!(
            "synthesize",
            operation_id = %Uuid::new_v4(),
            requested_engine = %request.requested_engine,
        );

        async {
            if request.text.trim().is_empty() {
                tracing::warn!("Rejecting synthesis request with empty text");
                return OperationResult::failed(
                    SpeechError::InvalidInput("text must not be empty".to_string()),
                    Vec::new(),
                );
            }

            self.run(Capability::Tts, &request.requested_engine, move |engine| async move {
                self.attempt_synthesis(&engine, request).await
            })
            .await
        }
        .instrument(span)
        .await
    }

    pub async fn transcribe(&self, request: &TranscriptionRequest) -> OperationResult<Transcript> {
        let span = tracing::info_span!(
            "transcribe",
            operation_id = %Uuid::new_v4(),
            requested_engine = %request.requested_engine,
        );

        async {
            if request.audio.is_empty() {
                tracing::warn!("Rejecting transcription request with empty audio");
                return OperationResult::failed(
                    SpeechError::InvalidInput("audio must not be empty".to_string()),
                    Vec::new(),
                );
            }
            if request.audio.len() > self.max_audio_bytes {
                tracing::warn!(
                    bytes = request.audio.len(),
                    limit = self.max_audio_bytes,
                    "Rejecting oversized transcription request"
                );
                return OperationResult::failed(
                    SpeechError::InvalidInput(format!(
                        "audio is {} bytes, limit is {}",
                        request.audio.len(),
                        self.max_audio_bytes
                    )),
                    Vec::new(),
                );
            }

            self.run(Capability::Asr, &request.requested_engine, move |engine| async move {
                self.attempt_transcription(&engine, request).await
            })
            .await
        }
        .instrument(span)
        .await
    }

    async fn run<T, F, Fut>(
        &self,
        capability: Capability,
        preference: &EnginePreference,
        mut attempt: F,
    ) -> OperationResult<T>
    where
        F: FnMut(EngineId) -> Fut,
        Fut: Future<Output = Result<T, SpeechError>>,
    {
        let candidates = match self.plan(capability, preference) {
            Ok(candidates) => candidates,
            Err(error) => {
                tracing::warn!(error = %error, "Requested engine cannot serve the operation");
                return OperationResult::failed(error, Vec::new());
            }
        };

        let mut attempts = Vec::with_capacity(candidates.len());
        for engine in candidates {
            match attempt(engine.clone()).await {
                Ok(payload) => {
                    tracing::info!(engine = %engine, failed_before = attempts.len(), "Provider served request");
                    attempts.push(ProviderAttempt::succeeded(engine.clone()));
                    return OperationResult::served(engine, payload, attempts);
                }
                Err(error) => {
                    tracing::warn!(engine = %engine, error = %error, "Provider attempt failed");
                    attempts.push(ProviderAttempt::failed(engine, error.to_string()));
                    if !preference.is_auto() {
                        return OperationResult::failed(error, attempts);
                    }
                }
            }
        }

        let error = SpeechError::AllProvidersFailed {
            capability,
            attempted: attempts.clone(),
        };
        tracing::error!(error = %error, "No provider could serve the request");
        OperationResult::failed(error, attempts)
    }

    fn plan(
        &self,
        capability: Capability,
        preference: &EnginePreference,
    ) -> Result<Vec<EngineId>, SpeechError> {
        let id = match preference {
            EnginePreference::Auto => return Ok(self.registry.candidates(capability)),
            EnginePreference::Named(id) => id,
        };

        let unavailable = |reason: String| SpeechError::ProviderUnavailable {
            engine: id.clone(),
            reason,
        };

        let descriptor = self
            .registry
            .descriptor(id)
            .ok_or_else(|| unavailable("engine is not registered".to_string()))?;

        if !descriptor.supports(capability) {
            return Err(unavailable(format!("engine does not support {}", capability)));
        }
        if !descriptor.available {
            return Err(unavailable(
                descriptor
                    .init_error
                    .clone()
                    .unwrap_or_else(|| "engine failed to initialize".to_string()),
            ));
        }

        Ok(vec![id.clone()])
    }

    async fn attempt_synthesis(
        &self,
        engine: &EngineId,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedSpeech, SpeechError> {
        let synthesizer = self.registry.synthesizer(engine).ok_or_else(|| {
            SpeechError::ProviderUnavailable {
                engine: engine.clone(),
                reason: "no synthesizer registered".to_string(),
            }
        })?;

        tracing::debug!(
            engine = %engine,
            chars = request.text.chars().count(),
            voice = %request.voice,
            "Attempting speech synthesis"
        );

        let audio = self
            .bounded(synthesizer.synthesize(&request.text, &request.voice))
            .await
            .map_err(|e| call_failed(engine, e))?;

        let speech = normalize_audio(audio).map_err(|e| match e {
            NormalizeError::EmptyAudio => call_failed(engine, ProviderError::EmptyResult),
            NormalizeError::UnsupportedFormat(detail) => SpeechError::UnsupportedFormat {
                engine: engine.clone(),
                detail,
            },
        })?;

        tracing::info!(
            engine = %engine,
            bytes = speech.wav.len(),
            sample_rate = speech.sample_rate,
            duration_secs = speech.duration_secs(),
            "Speech synthesis completed"
        );

        Ok(speech)
    }

    async fn attempt_transcription(
        &self,
        engine: &EngineId,
        request: &TranscriptionRequest,
    ) -> Result<Transcript, SpeechError> {
        let recognizer = self.registry.recognizer(engine).ok_or_else(|| {
            SpeechError::ProviderUnavailable {
                engine: engine.clone(),
                reason: "no recognizer registered".to_string(),
            }
        })?;

        tracing::debug!(engine = %engine, bytes = request.audio.len(), "Attempting transcription");

        let recognized = self
            .bounded(recognizer.recognize(&request.audio))
            .await
            .map_err(|e| call_failed(engine, e))?;

        let transcript = normalize_transcript(recognized);

        tracing::info!(
            engine = %engine,
            chars = transcript.text.len(),
            confidence = transcript.confidence,
            "Transcription completed"
        );

        Ok(transcript)
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.provider_timeout)),
        }
    }
}

fn call_failed(engine: &EngineId, error: ProviderError) -> SpeechError {
    SpeechError::ProviderCallFailed {
        engine: engine.clone(),
        reason: error.to_string(),
    }
}
