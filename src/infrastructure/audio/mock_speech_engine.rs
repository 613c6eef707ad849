use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    AudioEncoding, ProviderError, RecognizedSpeech, SpeechRecognizer, SpeechSynthesizer,
    SynthesizedAudio,
};

#[derive(Debug, Clone)]
enum MockBehavior {
    Succeed,
    Fail(String),
    Empty,
    Hang(Duration),
}

/// Scriptable engine for exercising the resolver without real providers.
pub struct MockSpeechEngine {
    behavior: MockBehavior,
    audio: SynthesizedAudio,
    transcript: RecognizedSpeech,
    calls: AtomicUsize,
}

impl MockSpeechEngine {
    pub fn succeeding() -> Self {
        Self::with_behavior(MockBehavior::Succeed)
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(reason.into()))
    }

    pub fn empty() -> Self {
        Self::with_behavior(MockBehavior::Empty)
    }

    pub fn hanging(delay: Duration) -> Self {
        Self::with_behavior(MockBehavior::Hang(delay))
    }

    pub fn with_audio(mut self, audio: SynthesizedAudio) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_transcript(mut self, transcript: &str, confidence: Option<f32>) -> Self {
        self.transcript = RecognizedSpeech {
            transcript: transcript.to_string(),
            confidence,
        };
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            audio: SynthesizedAudio {
                data: vec![0; 4410],
                encoding: AudioEncoding::LinearPcm {
                    sample_rate: 22_050,
                    channels: 1,
                },
            },
            transcript: RecognizedSpeech {
                transcript: "mock transcript".to_string(),
                confidence: Some(0.9),
            },
            calls: AtomicUsize::new(0),
        }
    }

    async fn respond<T>(&self, success: T, empty: T) -> Result<T, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Succeed => Ok(success),
            MockBehavior::Fail(reason) => Err(ProviderError::ApiRequestFailed(reason.clone())),
            MockBehavior::Empty => Ok(empty),
            MockBehavior::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(success)
            }
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechEngine {
    async fn synthesize(&self, _text: &str, _voice: &str) -> Result<SynthesizedAudio, ProviderError> {
        let empty = SynthesizedAudio {
            data: Vec::new(),
            encoding: self.audio.encoding.clone(),
        };
        self.respond(self.audio.clone(), empty).await
    }
}

#[async_trait]
impl SpeechRecognizer for MockSpeechEngine {
    async fn recognize(&self, _audio: &[u8]) -> Result<RecognizedSpeech, ProviderError> {
        match self.behavior {
            MockBehavior::Empty => {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::EmptyResult)
            }
            _ => {
                let transcript = self.transcript.clone();
                self.respond(transcript.clone(), transcript).await
            }
        }
    }
}
