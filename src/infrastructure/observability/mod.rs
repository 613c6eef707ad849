mod init_tracing;
mod text_sanitizer;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use text_sanitizer::sanitize_text;
pub use tracing_config::TracingConfig;
