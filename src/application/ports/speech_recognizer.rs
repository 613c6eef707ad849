use async_trait::async_trait;

use super::provider_error::ProviderError;

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedSpeech {
    pub transcript: String,
    pub confidence: Option<f32>,
}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, audio: &[u8]) -> Result<RecognizedSpeech, ProviderError>;
}
