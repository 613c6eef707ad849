use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::presentation::handlers::{
    engines_handler, health_handler, synthesize_handler, transcribe_handler,
};
use crate::presentation::state::AppState;

#[derive(Debug, Parser)]
#[command(
    name = "hybrid-speech",
    version,
    about = "Speech synthesis and recognition with automatic engine fallback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report whether each operation has a usable engine.
    Health,
    /// List probed engines, their capabilities and priority order.
    Engines,
    /// Convert text to a WAV file.
    Synthesize {
        #[arg(long)]
        text: String,
        #[arg(long)]
        voice: Option<String>,
        /// `auto` or an engine id such as `riva` or `espeak`.
        #[arg(long, default_value = "auto")]
        engine: String,
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Transcribe an audio file.
    Transcribe {
        file: PathBuf,
        /// `auto` or an engine id such as `riva` or `whisper`.
        #[arg(long, default_value = "auto")]
        engine: String,
    },
}

/// Rendered JSON report plus whether the command succeeded.
#[derive(Debug)]
pub struct CommandOutcome {
    pub report: String,
    pub success: bool,
}

impl CommandOutcome {
    fn from_response<T: Serialize>(response: &T, success: bool) -> Result<Self, serde_json::Error> {
        Ok(Self {
            report: serde_json::to_string_pretty(response)?,
            success,
        })
    }
}

pub async fn execute(command: Command, state: &AppState) -> Result<CommandOutcome, serde_json::Error> {
    match command {
        Command::Health => {
            let response = health_handler(state);
            CommandOutcome::from_response(&response, response.is_healthy())
        }
        Command::Engines => CommandOutcome::from_response(&engines_handler(state), true),
        Command::Synthesize {
            text,
            voice,
            engine,
            output,
        } => {
            let response = synthesize_handler(state, &text, voice, &engine, &output).await;
            CommandOutcome::from_response(&response, response.success)
        }
        Command::Transcribe { file, engine } => {
            let response = transcribe_handler(state, &file, &engine).await;
            CommandOutcome::from_response(&response, response.success)
        }
    }
}
