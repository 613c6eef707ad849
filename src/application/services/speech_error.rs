use serde::Serialize;

use crate::domain::{Capability, EngineId};

/// One provider invocation made while serving a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderAttempt {
    pub engine: EngineId,
    pub error: Option<String>,
}

impl ProviderAttempt {
    pub fn succeeded(engine: EngineId) -> Self {
        Self {
            engine,
            error: None,
        }
    }

    pub fn failed(engine: EngineId, error: impl Into<String>) -> Self {
        Self {
            engine,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeechError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("provider {engine} unavailable: {reason}")]
    ProviderUnavailable { engine: EngineId, reason: String },
    #[error("provider {engine} failed: {reason}")]
    ProviderCallFailed { engine: EngineId, reason: String },
    #[error("provider {engine} returned unsupported audio: {detail}")]
    UnsupportedFormat { engine: EngineId, detail: String },
    #[error("all {capability} providers failed ({})", describe_attempts(.attempted))]
    AllProvidersFailed {
        capability: Capability,
        attempted: Vec<ProviderAttempt>,
    },
}

impl SpeechError {
    pub fn kind(&self) -> &'static str {
        match self {
            SpeechError::InvalidInput(_) => "InvalidInput",
            SpeechError::ProviderUnavailable { .. } => "ProviderUnavailable",
            SpeechError::ProviderCallFailed { .. } => "ProviderCallFailed",
            SpeechError::UnsupportedFormat { .. } => "UnsupportedFormat",
            SpeechError::AllProvidersFailed { .. } => "AllProvidersFailed",
        }
    }

    /// Caller mistakes, as opposed to provider trouble.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SpeechError::InvalidInput(_) | SpeechError::ProviderUnavailable { .. }
        )
    }
}

fn describe_attempts(attempts: &[ProviderAttempt]) -> String {
    if attempts.is_empty() {
        return "no available provider".to_string();
    }

    attempts
        .iter()
        .map(|a| match &a.error {
            Some(error) => format!("{}: {}", a.engine, error),
            None => a.engine.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
