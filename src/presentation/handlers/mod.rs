mod engines;
mod error_response;
mod health;
mod synthesize;
mod transcribe;

pub use engines::{EnginesResponse, engines_handler};
pub use error_response::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use synthesize::{SynthesizeResponse, synthesize_handler};
pub use transcribe::{TranscribeResponse, transcribe_handler};
