use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Capability, EngineId};
use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub engines: BTreeMap<String, bool>,
    pub primary_tts: EngineId,
    pub primary_asr: EngineId,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Healthy when both operations have at least one usable engine.
pub fn health_handler(state: &AppState) -> HealthResponse {
    let registry = state.resolver.registry();

    let engines = registry
        .descriptors()
        .map(|d| (d.id.to_string(), d.available))
        .collect();

    let primary_tts = registry.primary(Capability::Tts);
    let primary_asr = registry.primary(Capability::Asr);
    let status = if primary_tts.is_some() && primary_asr.is_some() {
        "healthy"
    } else {
        "degraded"
    };

    HealthResponse {
        status: status.to_string(),
        engines,
        primary_tts: primary_tts.unwrap_or_else(EngineId::none),
        primary_asr: primary_asr.unwrap_or_else(EngineId::none),
    }
}
