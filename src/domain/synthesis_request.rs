use super::engine_preference::EnginePreference;

pub const DEFAULT_VOICE: &str = "English-US.Female-1";

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub requested_engine: EnginePreference,
}

impl SynthesisRequest {
    pub fn new(
        text: impl Into<String>,
        voice: Option<String>,
        requested_engine: EnginePreference,
    ) -> Self {
        Self {
            text: text.into(),
            voice: voice
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            requested_engine,
        }
    }
}
