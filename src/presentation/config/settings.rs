use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::Deserialize;

use crate::application::services::{DEFAULT_MAX_AUDIO_BYTES, DEFAULT_PROVIDER_TIMEOUT};
use crate::domain::DEFAULT_VOICE;
use crate::infrastructure::audio::{DEFAULT_AMPLITUDE, DEFAULT_WORDS_PER_MINUTE};

use super::environment::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub speech: SpeechSettings,
    pub riva: RivaSettings,
    pub espeak: EspeakSettings,
    pub whisper: WhisperSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub prefer_local_only: bool,
    pub provider_timeout_secs: u64,
    pub tts_priority: Vec<String>,
    pub asr_priority: Vec<String>,
    pub default_voice: String,
    pub max_audio_bytes: usize,
    pub temp_dir: Option<PathBuf>,
}

impl SpeechSettings {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RivaSettings {
    pub enabled: bool,
    pub cloud_endpoint: String,
    pub api_key: Option<String>,
    pub language_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EspeakSettings {
    pub enabled: bool,
    pub binary: String,
    pub voice: String,
    pub words_per_minute: u32,
    pub amplitude: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhisperSettings {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid environment: {0}")]
    Environment(String),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Settings {
    /// Layers defaults, `config/appsettings.{env}`, `APP_*` variables and the
    /// legacy `RIVA_SERVER` / `NVIDIA_RIVA_API_KEY` variables, in that order.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let builder = Self::with_defaults(Config::builder())?
            .add_source(
                File::with_name(&format!("config/appsettings.{}", environment.as_str()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("speech.tts_priority")
                    .with_list_parse_key("speech.asr_priority")
                    .try_parsing(true),
            )
            .set_override_option("riva.cloud_endpoint", std::env::var("RIVA_SERVER").ok())?
            .set_override_option("riva.api_key", std::env::var("NVIDIA_RIVA_API_KEY").ok())?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Built-in defaults only, ignoring files and the process environment.
    pub fn defaults() -> Result<Self, SettingsError> {
        let settings: Settings = Self::with_defaults(Config::builder())?
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        builder
            .set_default("speech.prefer_local_only", false)?
            .set_default(
                "speech.provider_timeout_secs",
                DEFAULT_PROVIDER_TIMEOUT.as_secs() as i64,
            )?
            .set_default("speech.tts_priority", vec!["riva", "espeak"])?
            .set_default("speech.asr_priority", vec!["riva", "whisper"])?
            .set_default("speech.default_voice", DEFAULT_VOICE)?
            .set_default("speech.max_audio_bytes", DEFAULT_MAX_AUDIO_BYTES as i64)?
            .set_default("riva.enabled", true)?
            .set_default("riva.cloud_endpoint", "localhost:50051")?
            .set_default("riva.language_code", "en-US")?
            .set_default("espeak.enabled", true)?
            .set_default("espeak.binary", "espeak-ng")?
            .set_default("espeak.voice", "en-us")?
            .set_default("espeak.words_per_minute", DEFAULT_WORDS_PER_MINUTE as i64)?
            .set_default("espeak.amplitude", DEFAULT_AMPLITUDE as i64)?
            .set_default("whisper.enabled", true)?
            .set_default("whisper.base_url", "http://localhost:8000/v1")?
            .set_default("whisper.model", "whisper-1")?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }
}
