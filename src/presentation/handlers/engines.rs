use serde::Serialize;

use crate::domain::{Capability, EngineDescriptor, EngineId};
use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct EnginesResponse {
    pub engines: Vec<EngineDescriptor>,
    pub tts_priority: Vec<EngineId>,
    pub asr_priority: Vec<EngineId>,
}

pub fn engines_handler(state: &AppState) -> EnginesResponse {
    let registry = state.resolver.registry();

    EnginesResponse {
        engines: registry.descriptors().cloned().collect(),
        tts_priority: registry.priority(Capability::Tts).to_vec(),
        asr_priority: registry.priority(Capability::Asr).to_vec(),
    }
}
