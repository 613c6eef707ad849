pub mod cli;
pub mod config;
pub mod handlers;
pub mod state;

pub use cli::{Cli, Command, CommandOutcome, execute};
pub use config::{Environment, Settings};
pub use state::AppState;
