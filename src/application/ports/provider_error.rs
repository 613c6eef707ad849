use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("initialization failed: {0}")]
    InitializationFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("provider returned an empty result")]
    EmptyResult,
    #[error("process failed: {0}")]
    ProcessFailed(String),
    #[error("timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
