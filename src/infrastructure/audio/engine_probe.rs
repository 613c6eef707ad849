use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{EngineRegistration, EngineRegistry, RegistryError};
use crate::domain::{Capability, CapabilitySet};
use crate::presentation::config::Settings;

use super::espeak_engine::{ESPEAK_ENGINE, EspeakEngine};
use super::riva_speech_engine::{RIVA_ENGINE, RivaSpeechEngine};
use super::whisper_engine::{WHISPER_ENGINE, WhisperEngine};

/// Startup capability detection: one registration per known provider.
pub struct EngineProbe;

impl EngineProbe {
    /// Probes every provider once. A provider that fails to initialize is
    /// registered as unavailable and never aborts the others.
    pub async fn probe(settings: &Settings) -> Result<EngineRegistry, RegistryError> {
        let timeout = settings.speech.provider_timeout();

        let registrations = [
            Self::probe_riva(settings, timeout),
            Self::probe_espeak(settings).await,
            Self::probe_whisper(settings, timeout).await,
        ];

        let mut builder = EngineRegistry::builder();
        for registration in registrations {
            let descriptor = registration.descriptor();
            match &descriptor.init_error {
                None => tracing::info!(
                    engine = %descriptor.id,
                    capability = ?descriptor.capability.iter().collect::<Vec<_>>(),
                    "Speech engine available"
                ),
                Some(reason) => tracing::warn!(
                    engine = %descriptor.id,
                    reason = %reason,
                    "Speech engine unavailable"
                ),
            }
            builder = builder.register(registration);
        }

        builder
            .priority(
                Capability::Tts,
                settings.speech.tts_priority.iter().map(String::as_str),
            )
            .priority(
                Capability::Asr,
                settings.speech.asr_priority.iter().map(String::as_str),
            )
            .build()
    }

    fn probe_riva(settings: &Settings, timeout: Duration) -> EngineRegistration {
        let capability = CapabilitySet::both();

        if !settings.riva.enabled {
            return EngineRegistration::unavailable(
                RIVA_ENGINE,
                capability,
                "disabled in configuration",
            );
        }
        if settings.speech.prefer_local_only {
            return EngineRegistration::unavailable(
                RIVA_ENGINE,
                capability,
                "cloud providers disabled by prefer_local_only",
            );
        }

        match RivaSpeechEngine::new(
            &settings.riva.cloud_endpoint,
            settings.riva.api_key.clone(),
            &settings.riva.language_code,
            timeout,
        ) {
            Ok(engine) => {
                let engine = Arc::new(engine);
                EngineRegistration::new(RIVA_ENGINE)
                    .with_synthesizer(engine.clone())
                    .with_recognizer(engine)
            }
            Err(e) => EngineRegistration::unavailable(RIVA_ENGINE, capability, e.to_string()),
        }
    }

    async fn probe_espeak(settings: &Settings) -> EngineRegistration {
        let capability = CapabilitySet::only(Capability::Tts);

        if !settings.espeak.enabled {
            return EngineRegistration::unavailable(
                ESPEAK_ENGINE,
                capability,
                "disabled in configuration",
            );
        }

        let engine = EspeakEngine::new(&settings.espeak.binary, &settings.espeak.voice)
            .with_rate(settings.espeak.words_per_minute, settings.espeak.amplitude)
            .with_temp_dir(settings.speech.temp_dir.clone());

        match engine.probe().await {
            Ok(version) => {
                tracing::debug!(version = %version, "espeak-ng detected");
                EngineRegistration::new(ESPEAK_ENGINE).with_synthesizer(Arc::new(engine))
            }
            Err(e) => EngineRegistration::unavailable(ESPEAK_ENGINE, capability, e.to_string()),
        }
    }

    async fn probe_whisper(settings: &Settings, timeout: Duration) -> EngineRegistration {
        let capability = CapabilitySet::only(Capability::Asr);

        if !settings.whisper.enabled {
            return EngineRegistration::unavailable(
                WHISPER_ENGINE,
                capability,
                "disabled in configuration",
            );
        }

        let engine = match WhisperEngine::new(
            &settings.whisper.base_url,
            &settings.whisper.model,
            settings.whisper.api_key.clone(),
            timeout,
        ) {
            Ok(engine) => engine,
            Err(e) => {
                return EngineRegistration::unavailable(WHISPER_ENGINE, capability, e.to_string());
            }
        };

        match engine.probe().await {
            Ok(()) => EngineRegistration::new(WHISPER_ENGINE).with_recognizer(Arc::new(engine)),
            Err(e) => EngineRegistration::unavailable(WHISPER_ENGINE, capability, e.to_string()),
        }
    }
}
