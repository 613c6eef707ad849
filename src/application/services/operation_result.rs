use crate::domain::EngineId;

use super::speech_error::{ProviderAttempt, SpeechError};

/// Envelope returned for every synthesize / transcribe call.
#[derive(Debug, Clone)]
pub struct OperationResult<T> {
    pub engine_used: EngineId,
    pub outcome: Result<T, SpeechError>,
    pub attempts: Vec<ProviderAttempt>,
}

impl<T> OperationResult<T> {
    pub(crate) fn served(engine: EngineId, payload: T, attempts: Vec<ProviderAttempt>) -> Self {
        Self {
            engine_used: engine,
            outcome: Ok(payload),
            attempts,
        }
    }

    pub(crate) fn failed(error: SpeechError, attempts: Vec<ProviderAttempt>) -> Self {
        Self {
            engine_used: EngineId::none(),
            outcome: Err(error),
            attempts,
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn payload(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&SpeechError> {
        self.outcome.as_ref().err()
    }

    pub fn attempted_engines(&self) -> Vec<&EngineId> {
        self.attempts.iter().map(|a| &a.engine).collect()
    }

    pub fn into_result(self) -> Result<(T, EngineId), SpeechError> {
        let engine = self.engine_used;
        self.outcome.map(|payload| (payload, engine))
    }
}
