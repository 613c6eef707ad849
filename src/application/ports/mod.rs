mod provider_error;
mod speech_recognizer;
mod speech_synthesizer;

pub use provider_error::ProviderError;
pub use speech_recognizer::{RecognizedSpeech, SpeechRecognizer};
pub use speech_synthesizer::{AudioEncoding, SpeechSynthesizer, SynthesizedAudio};
