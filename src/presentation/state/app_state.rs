use std::sync::Arc;

use crate::application::services::{EngineRegistry, FallbackResolver};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<FallbackResolver>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(registry: EngineRegistry, settings: Settings) -> Self {
        let resolver = FallbackResolver::new(Arc::new(registry), settings.speech.provider_timeout())
            .with_max_audio_bytes(settings.speech.max_audio_bytes);

        Self {
            resolver: Arc::new(resolver),
            settings,
        }
    }
}
