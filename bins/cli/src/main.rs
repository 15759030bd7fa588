//! Tourdesk command-line tool
//!
//! Runs the pricing and tax engine against JSON catalog and rate files and
//! prints results as JSON.

mod commands;
mod input;

use std::process::ExitCode;

use clap::Parser;
use tourdesk_core::EngineError;
use tourdesk_shared::AppConfig;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use commands::Commands;

#[derive(Debug, Parser)]
#[command(
    name = "tourdesk",
    version,
    about = "Pricing, IGV and exchange-rate calculations for tour operations",
    long_about = "Computes IGV splits, resolves seasonal supplier prices, converts \
                  amounts with date-scoped exchange rates and validates Peruvian \
                  identity documents."
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "TOURDESK_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(config: &AppConfig, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<EngineError>() {
        Some(engine) => eprintln!("error[{}]: {err:#}", engine.error_code()),
        None => eprintln!("error: {err:#}"),
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.error_code());
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config, cli.log_json);
    debug!(
        igv_rate = %config.tax.igv_rate,
        base_currency = %config.currency.base_currency,
        "Configuration loaded"
    );

    let output = commands::run(cli.command, &config)
        .and_then(|value| Ok(serde_json::to_string_pretty(&value)?));

    match output {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
