mod capability;
mod engine_descriptor;
mod engine_id;
mod engine_preference;
mod speech_output;
mod synthesis_request;
mod transcription_request;

pub use capability::{Capability, CapabilitySet};
pub use engine_descriptor::EngineDescriptor;
pub use engine_id::{EngineId, NO_ENGINE};
pub use engine_preference::EnginePreference;
pub use speech_output::{SynthesizedSpeech, Transcript, WAV_CONTENT_TYPE};
pub use synthesis_request::{DEFAULT_VOICE, SynthesisRequest};
pub use transcription_request::TranscriptionRequest;
