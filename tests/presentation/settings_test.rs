use std::time::Duration;

use hybrid_speech::application::services::{DEFAULT_MAX_AUDIO_BYTES, DEFAULT_PROVIDER_TIMEOUT};
use hybrid_speech::domain::DEFAULT_VOICE;
use hybrid_speech::infrastructure::audio::{DEFAULT_AMPLITUDE, DEFAULT_WORDS_PER_MINUTE};
use hybrid_speech::presentation::Settings;

#[test]
fn given_no_sources_when_loading_defaults_then_documented_values() {
    let settings = Settings::defaults().unwrap();

    assert!(!settings.speech.prefer_local_only);
    assert_eq!(settings.speech.provider_timeout(), Duration::from_secs(30));
    assert_eq!(settings.speech.tts_priority, vec!["riva", "espeak"]);
    assert_eq!(settings.speech.asr_priority, vec!["riva", "whisper"]);
    assert_eq!(settings.speech.default_voice, "English-US.Female-1");
    assert_eq!(settings.speech.max_audio_bytes, 25 * 1024 * 1024);
    assert!(settings.speech.temp_dir.is_none());

    assert!(settings.riva.enabled);
    assert_eq!(settings.riva.cloud_endpoint, "localhost:50051");
    assert!(settings.riva.api_key.is_none());
    assert_eq!(settings.riva.language_code, "en-US");

    assert_eq!(settings.espeak.binary, "espeak-ng");
    assert_eq!(settings.espeak.voice, "en-us");
    assert_eq!(settings.espeak.words_per_minute, 150);
    assert_eq!(settings.espeak.amplitude, 80);

    assert_eq!(settings.whisper.base_url, "http://localhost:8000/v1");
    assert_eq!(settings.whisper.model, "whisper-1");

    assert_eq!(settings.logging.level, "info");
    assert!(!settings.logging.enable_json);
}

#[test]
fn given_zero_timeout_when_reading_provider_timeout_then_at_least_one_second() {
    let mut settings = Settings::defaults().unwrap();
    settings.speech.provider_timeout_secs = 0;

    assert_eq!(settings.speech.provider_timeout(), Duration::from_secs(1));
}

#[test]
fn given_defaults_when_compared_with_runtime_constants_then_identical() {
    let settings = Settings::defaults().unwrap();

    assert_eq!(settings.speech.provider_timeout(), DEFAULT_PROVIDER_TIMEOUT);
    assert_eq!(settings.speech.max_audio_bytes, DEFAULT_MAX_AUDIO_BYTES);
    assert_eq!(settings.speech.default_voice, DEFAULT_VOICE);
    assert_eq!(settings.espeak.words_per_minute, DEFAULT_WORDS_PER_MINUTE);
    assert_eq!(settings.espeak.amplitude, DEFAULT_AMPLITUDE);
}
