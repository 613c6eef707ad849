use serde::Serialize;

use crate::application::services::SpeechError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn io(context: &str, error: &std::io::Error) -> Self {
        Self {
            kind: "Io".to_string(),
            message: format!("{}: {}", context, error),
        }
    }
}

impl From<&SpeechError> for ErrorResponse {
    fn from(error: &SpeechError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}
