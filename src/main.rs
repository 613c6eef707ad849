use std::process::ExitCode;

use clap::Parser;

use hybrid_speech::infrastructure::audio::EngineProbe;
use hybrid_speech::infrastructure::observability::{TracingConfig, init_tracing};
use hybrid_speech::presentation::{AppState, Cli, Environment, Settings, execute};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let environment = Environment::from_env()?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(&settings.logging, environment));

    let registry = EngineProbe::probe(&settings).await?;
    let state = AppState::new(registry, settings);

    let outcome = execute(cli.command, &state).await?;
    println!("{}", outcome.report);

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
