use std::fmt;

use super::engine_id::EngineId;

/// Engine requested by the caller: automatic selection or one named provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnginePreference {
    #[default]
    Auto,
    Named(EngineId),
}

impl EnginePreference {
    pub fn is_auto(&self) -> bool {
        matches!(self, EnginePreference::Auto)
    }
}

impl From<&str> for EnginePreference {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            EnginePreference::Auto
        } else {
            EnginePreference::Named(EngineId::new(trimmed))
        }
    }
}

impl From<Option<&str>> for EnginePreference {
    fn from(value: Option<&str>) -> Self {
        value.map(EnginePreference::from).unwrap_or_default()
    }
}

impl fmt::Display for EnginePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnginePreference::Auto => f.write_str("auto"),
            EnginePreference::Named(id) => write!(f, "{}", id),
        }
    }
}
