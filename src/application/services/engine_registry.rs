use std::collections::HashSet;
use std::sync::Arc;

use crate::application::ports::{SpeechRecognizer, SpeechSynthesizer};
use crate::domain::{Capability, CapabilitySet, EngineDescriptor, EngineId};

/// A probed provider together with the adapters that serve it.
pub struct EngineRegistration {
    descriptor: EngineDescriptor,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
}

impl EngineRegistration {
    pub fn new(id: impl Into<EngineId>) -> Self {
        Self {
            descriptor: EngineDescriptor::available(id.into(), CapabilitySet::empty()),
            synthesizer: None,
            recognizer: None,
        }
    }

    pub fn unavailable(
        id: impl Into<EngineId>,
        capability: CapabilitySet,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            descriptor: EngineDescriptor::unavailable(id.into(), capability, reason),
            synthesizer: None,
            recognizer: None,
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.descriptor.capability = self.descriptor.capability.with(Capability::Tts);
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.descriptor.capability = self.descriptor.capability.with(Capability::Asr);
        self.recognizer = Some(recognizer);
        self
    }

    pub fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("engine id must not be empty")]
    EmptyId,
    #[error("engine id '{0}' is reserved")]
    ReservedId(EngineId),
    #[error("engine '{0}' registered twice")]
    DuplicateEngine(EngineId),
    #[error("{capability} priority names unknown engine '{engine}'")]
    UnknownPriorityEngine {
        capability: Capability,
        engine: EngineId,
    },
}

/// Immutable table of every known engine, built once at startup.
pub struct EngineRegistry {
    engines: Vec<EngineRegistration>,
    tts_priority: Vec<EngineId>,
    asr_priority: Vec<EngineId>,
}

impl EngineRegistry {
    pub fn builder() -> EngineRegistryBuilder {
        EngineRegistryBuilder::default()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &EngineDescriptor> {
        self.engines.iter().map(|e| &e.descriptor)
    }

    pub fn descriptor(&self, id: &EngineId) -> Option<&EngineDescriptor> {
        self.find(id).map(|e| &e.descriptor)
    }

    pub fn priority(&self, capability: Capability) -> &[EngineId] {
        match capability {
            Capability::Tts => &self.tts_priority,
            Capability::Asr => &self.asr_priority,
        }
    }

    /// Usable engines for `capability`, in priority order.
    pub fn candidates(&self, capability: Capability) -> Vec<EngineId> {
        self.priority(capability)
            .iter()
            .filter(|id| {
                let usable = self
                    .descriptor(id)
                    .is_some_and(|d| d.is_usable_for(capability));
                if !usable {
                    tracing::debug!(engine = %id, capability = %capability, "Skipping unusable engine");
                }
                usable
            })
            .cloned()
            .collect()
    }

    pub fn primary(&self, capability: Capability) -> Option<EngineId> {
        self.candidates(capability).into_iter().next()
    }

    pub fn synthesizer(&self, id: &EngineId) -> Option<&Arc<dyn SpeechSynthesizer>> {
        self.find(id)
            .filter(|e| e.descriptor.available)
            .and_then(|e| e.synthesizer.as_ref())
    }

    pub fn recognizer(&self, id: &EngineId) -> Option<&Arc<dyn SpeechRecognizer>> {
        self.find(id)
            .filter(|e| e.descriptor.available)
            .and_then(|e| e.recognizer.as_ref())
    }

    fn find(&self, id: &EngineId) -> Option<&EngineRegistration> {
        self.engines.iter().find(|e| &e.descriptor.id == id)
    }
}

#[derive(Default)]
pub struct EngineRegistryBuilder {
    registrations: Vec<EngineRegistration>,
    tts_priority: Option<Vec<EngineId>>,
    asr_priority: Option<Vec<EngineId>>,
}

impl EngineRegistryBuilder {
    pub fn register(mut self, registration: EngineRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Explicit attempt order for `capability`. Without one, registration order is used.
    pub fn priority<I, S>(mut self, capability: Capability, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EngineId>,
    {
        let order = order.into_iter().map(Into::into).collect();
        match capability {
            Capability::Tts => self.tts_priority = Some(order),
            Capability::Asr => self.asr_priority = Some(order),
        }
        self
    }

    pub fn build(self) -> Result<EngineRegistry, RegistryError> {
        let mut seen = HashSet::new();
        for registration in &self.registrations {
            let id = &registration.descriptor.id;
            if id.as_str().is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if id.is_none() {
                return Err(RegistryError::ReservedId(id.clone()));
            }
            if !seen.insert(id.clone()) {
                return Err(RegistryError::DuplicateEngine(id.clone()));
            }
        }

        let tts_priority = resolve_priority(&self.registrations, Capability::Tts, self.tts_priority)?;
        let asr_priority = resolve_priority(&self.registrations, Capability::Asr, self.asr_priority)?;

        tracing::debug!(
            engines = self.registrations.len(),
            tts_priority = ?tts_priority,
            asr_priority = ?asr_priority,
            "Engine registry built"
        );

        Ok(EngineRegistry {
            engines: self.registrations,
            tts_priority,
            asr_priority,
        })
    }
}

fn resolve_priority(
    registrations: &[EngineRegistration],
    capability: Capability,
    explicit: Option<Vec<EngineId>>,
) -> Result<Vec<EngineId>, RegistryError> {
    let Some(order) = explicit else {
        return Ok(registrations
            .iter()
            .filter(|r| r.descriptor.supports(capability))
            .map(|r| r.descriptor.id.clone())
            .collect());
    };

    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(order.len());
    for engine in order {
        if !registrations.iter().any(|r| r.descriptor.id == engine) {
            return Err(RegistryError::UnknownPriorityEngine { capability, engine });
        }
        if seen.insert(engine.clone()) {
            resolved.push(engine);
        }
    }
    Ok(resolved)
}
