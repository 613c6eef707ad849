use std::fmt;

use serde::Serialize;

/// Label reported as `engine_used` when no provider served the request.
pub const NO_ENGINE: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EngineId(String);

impl EngineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_lowercase())
    }

    pub fn none() -> Self {
        Self(NO_ENGINE.to_string())
    }

    pub fn is_none(&self) -> bool {
        self.0 == NO_ENGINE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EngineId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
