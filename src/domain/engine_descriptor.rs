use serde::Serialize;

use super::capability::{Capability, CapabilitySet};
use super::engine_id::EngineId;

/// Outcome of probing one provider at startup. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineDescriptor {
    pub id: EngineId,
    pub capability: CapabilitySet,
    pub available: bool,
    pub init_error: Option<String>,
}

impl EngineDescriptor {
    pub fn available(id: EngineId, capability: CapabilitySet) -> Self {
        Self {
            id,
            capability,
            available: true,
            init_error: None,
        }
    }

    pub fn unavailable(id: EngineId, capability: CapabilitySet, reason: impl Into<String>) -> Self {
        Self {
            id,
            capability,
            available: false,
            init_error: Some(reason.into()),
        }
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capability.contains(capability)
    }

    pub fn is_usable_for(&self, capability: Capability) -> bool {
        self.available && self.supports(capability)
    }
}
