//! `linecheck`: scan Kalshi winner markets for contracts priced below the
//! sportsbook moneyline consensus.
//!
//! ```text
//! linecheck            # every sport with snapshot data
//! linecheck nfl        # one sport
//! linecheck nba --json # machine-readable summary
//! ```

mod cli;
mod render;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use linecheck_strategy::{sport::supported_codes, RunnerConfig, Sport, SportRunner};
use std::process::ExitCode;
use tracing::{debug, warn};

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_logging();
    cli.color.apply();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let sport = match cli.sport.as_deref().map(str::parse::<Sport>).transpose() {
        Ok(sport) => sport,
        Err(unknown) => {
            println!("Error: Unsupported sport '{}'", unknown.code);
            println!("Supported sports: {}", supported_codes());
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = cli.runner_config(RunnerConfig::from_env());
    debug!(?config, "Resolved configuration");

    let runner = SportRunner::new(config).context("Failed to initialise runner")?;

    match sport {
        Some(sport) => run_sport(&runner, sport, cli.json),
        None => run_all(&runner, cli.json),
    }
}

fn run_sport(runner: &SportRunner, sport: Sport, json: bool) -> anyhow::Result<ExitCode> {
    let summary = match runner.run(sport) {
        Ok(summary) => summary,
        Err(err) if err.is_missing_data() => {
            print!("{}", render::missing_sport(sport, &runner.config().data_dir));
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::sport(&summary));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_all(runner: &SportRunner, json: bool) -> anyhow::Result<ExitCode> {
    let batch = runner.run_all(Sport::ALL);

    if json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else if batch.has_data() || !batch.failed.is_empty() {
        print!("{}", render::batch(&batch));
    } else {
        print!("{}", render::missing_all(&runner.config().data_dir));
    }

    if batch.failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!(failed = batch.failed.len(), "Some sports failed to run");
        Ok(ExitCode::FAILURE)
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .init()
}
