#![warn(clippy::uninlined_format_args)]

mod config;
mod presenter;
mod text_table;

use anyhow::Context;
use config::{AppConfig, OutputFormat};
use presenter::SettlementPresenter;
use std::process;
use tracing_subscriber::EnvFilter;
use tripsettle_application::SettlementService;
use tripsettle_infrastructure::JsonTripSource;

fn main() {
    init_logging();

    if let Err(err) = run(AppConfig::load()) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: AppConfig) -> anyhow::Result<()> {
    let source = JsonTripSource::from_path(&config.trip);
    let service = SettlementService::new(&source, config.split_policy);

    let snapshot = service
        .load_snapshot()
        .with_context(|| format!("failed to load '{}'", config.trip.display()))?;
    let result = service
        .settle_snapshot(&snapshot)
        .with_context(|| format!("failed to settle '{}'", config.trip.display()))?;

    tracing::debug!(
        trip = %config.trip.display(),
        format = ?config.format,
        transfer_count = result.debts.len(),
        "Rendering settlement report"
    );

    let currency = config.currency.as_deref().or(snapshot.currency.as_deref());
    let presenter = SettlementPresenter::new(&snapshot.participants, currency);

    match config.format {
        OutputFormat::Text => print!("{}", presenter.render_text(&result)),
        OutputFormat::Json => println!("{}", presenter.render_json(&result)?),
    }

    Ok(())
}
