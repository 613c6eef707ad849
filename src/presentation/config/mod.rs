mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    EspeakSettings, LoggingSettings, RivaSettings, Settings, SettingsError, SpeechSettings,
    WhisperSettings,
};
