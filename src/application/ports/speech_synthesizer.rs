use async_trait::async_trait;

use super::provider_error::ProviderError;

/// Container of the bytes a synthesizer hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEncoding {
    Wav,
    /// Headerless signed 16-bit little-endian samples.
    LinearPcm { sample_rate: u32, channels: u16 },
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub data: Vec<u8>,
    pub encoding: AudioEncoding,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<SynthesizedAudio, ProviderError>;
}
