use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    #[serde(rename = "TTS")]
    Tts,
    #[serde(rename = "ASR")]
    Asr,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Tts => "TTS",
            Capability::Asr => "ASR",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subset of {TTS, ASR} an engine can serve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet {
    tts: bool,
    asr: bool,
}

impl CapabilitySet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn only(capability: Capability) -> Self {
        Self::empty().with(capability)
    }

    pub fn both() -> Self {
        Self::empty().with(Capability::Tts).with(Capability::Asr)
    }

    pub fn with(mut self, capability: Capability) -> Self {
        match capability {
            Capability::Tts => self.tts = true,
            Capability::Asr => self.asr = true,
        }
        self
    }

    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::Tts => self.tts,
            Capability::Asr => self.asr,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.tts && !self.asr
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        [Capability::Tts, Capability::Asr]
            .into_iter()
            .filter(|c| self.contains(*c))
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
