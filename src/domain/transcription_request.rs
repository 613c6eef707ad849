use super::engine_preference::EnginePreference;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    pub audio: Vec<u8>,
    pub requested_engine: EnginePreference,
}

impl TranscriptionRequest {
    pub fn new(audio: Vec<u8>, requested_engine: EnginePreference) -> Self {
        Self {
            audio,
            requested_engine,
        }
    }
}
