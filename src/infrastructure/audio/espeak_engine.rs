use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{
    AudioEncoding, ProviderError, SpeechSynthesizer, SynthesizedAudio,
};

pub const ESPEAK_ENGINE: &str = "espeak";

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 150;
pub const DEFAULT_AMPLITUDE: u32 = 80;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Offline synthesis through the `espeak-ng` command line tool.
///
/// Each call renders into its own temporary WAV file, removed when the call
/// returns, fails, or is dropped mid-flight.
pub struct EspeakEngine {
    binary: PathBuf,
    default_voice: String,
    words_per_minute: u32,
    amplitude: u32,
    temp_dir: Option<PathBuf>,
    probe_timeout: Duration,
}

impl EspeakEngine {
    pub fn new(binary: impl Into<PathBuf>, default_voice: &str) -> Self {
        Self {
            binary: binary.into(),
            default_voice: default_voice.to_string(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            amplitude: DEFAULT_AMPLITUDE,
            temp_dir: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_rate(mut self, words_per_minute: u32, amplitude: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self.amplitude = amplitude;
        self
    }

    pub fn with_temp_dir(mut self, temp_dir: Option<PathBuf>) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    /// Runs `<binary> --version` and returns the first line it prints.
    /// A binary that does not answer within the probe timeout is killed.
    pub async fn probe(&self) -> Result<String, ProviderError> {
        let version = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.probe_timeout, version)
            .await
            .map_err(|_| {
                ProviderError::InitializationFailed(format!(
                    "{} --version did not answer within {}s",
                    self.binary.display(),
                    self.probe_timeout.as_secs_f32()
                ))
            })?
            .map_err(|e| {
                ProviderError::InitializationFailed(format!(
                    "{} not runnable: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(ProviderError::InitializationFailed(format!(
                "{} --version exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        Ok(version)
    }

    /// Riva-style names such as `English-US.Female-1` mean nothing to espeak.
    fn resolve_voice<'a>(&'a self, voice: &'a str) -> &'a str {
        let voice = voice.trim();
        let looks_native = !voice.is_empty()
            && voice
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '_'));
        if looks_native && voice.len() <= 16 {
            voice
        } else {
            &self.default_voice
        }
    }

    fn create_temp_file(&self) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("espeak-").suffix(".wav");
        match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakEngine {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<SynthesizedAudio, ProviderError> {
        let voice = self.resolve_voice(voice);
        let output_file = self.create_temp_file()?;

        tracing::debug!(
            voice = %voice,
            path = %output_file.path().display(),
            "Rendering speech with espeak-ng"
        );

        let mut child = Command::new(&self.binary)
            .arg("-v")
            .arg(voice)
            .arg("-s")
            .arg(self.words_per_minute.to_string())
            .arg("-a")
            .arg(self.amplitude.to_string())
            .arg("-w")
            .arg(output_file.path())
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProviderError::ProcessFailed(format!("spawn: {}", e)))?;

        // An early exit closes the pipe; the exit status and stderr say why.
        let write_error = match child.stdin.take() {
            Some(mut stdin) => match stdin.write_all(text.as_bytes()).await {
                Ok(()) => stdin.shutdown().await.err(),
                Err(e) => Some(e),
            },
            None => None,
        };

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ProviderError::ProcessFailed(format!("wait: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProviderError::ProcessFailed(format!(
                "exited with {}: {}",
                output.status, stderr
            )));
        }
        if let Some(e) = write_error {
            return Err(ProviderError::ProcessFailed(format!("writing text: {}", e)));
        }

        let data = tokio::fs::read(output_file.path()).await?;

        if let Err(e) = output_file.close() {
            tracing::warn!(error = %e, "Failed to remove espeak output file");
        }

        if data.is_empty() {
            return Err(ProviderError::EmptyResult);
        }

        tracing::info!(bytes = data.len(), "espeak-ng synthesis completed");

        Ok(SynthesizedAudio {
            data,
            encoding: AudioEncoding::Wav,
        })
    }
}
