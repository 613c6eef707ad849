mod engine_registry;
mod fallback_resolver;
mod operation_result;
mod result_normalizer;
mod speech_error;

pub use engine_registry::{EngineRegistration, EngineRegistry, EngineRegistryBuilder, RegistryError};
pub use fallback_resolver::{DEFAULT_MAX_AUDIO_BYTES, DEFAULT_PROVIDER_TIMEOUT, FallbackResolver};
pub use operation_result::OperationResult;
pub use result_normalizer::{NormalizeError, normalize_audio, normalize_transcript};
pub use speech_error::{ProviderAttempt, SpeechError};
