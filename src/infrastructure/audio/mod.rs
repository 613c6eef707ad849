mod engine_probe;
mod espeak_engine;
mod mock_speech_engine;
mod riva_speech_engine;
mod whisper_engine;

pub use engine_probe::EngineProbe;
pub use espeak_engine::{
    DEFAULT_AMPLITUDE, DEFAULT_PROBE_TIMEOUT, DEFAULT_WORDS_PER_MINUTE, ESPEAK_ENGINE, EspeakEngine,
};
pub use mock_speech_engine::MockSpeechEngine;
pub use riva_speech_engine::{RIVA_ENGINE, RivaSpeechEngine};
pub use whisper_engine::{WHISPER_ENGINE, WhisperEngine};
