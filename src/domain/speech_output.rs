use serde::Serialize;

pub const WAV_CONTENT_TYPE: &str = "audio/wav";

/// WAV-encoded synthesis output.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedSpeech {
    pub wav: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
    pub frames: u32,
}

impl SynthesizedSpeech {
    pub fn content_type(&self) -> &'static str {
        WAV_CONTENT_TYPE
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f32 / self.sample_rate as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub text: String,
    pub confidence: f32,
}
