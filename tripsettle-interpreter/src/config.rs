use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tripsettle_application::SplitPolicy;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settle shared trip expenses: who owes whom, and how much.
#[derive(Debug, Parser)]
#[command(name = "tripsettle", version, about)]
pub struct Cli {
    /// Trip snapshot in JSON (participants and expenses).
    pub trip: PathBuf,

    /// Reject expenses whose splits do not add up to the expense amount.
    #[arg(
        long,
        env = "TRIPSETTLE_STRICT_SPLITS",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub strict_splits: bool,

    /// Output format.
    #[arg(long, value_enum, env = "TRIPSETTLE_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Currency label appended to amounts, overriding the one in the trip file.
    #[arg(long, env = "TRIPSETTLE_CURRENCY")]
    pub currency: Option<String>,
}

/// Application configuration resolved from arguments, environment and `.env`.
#[derive(Debug)]
pub struct AppConfig {
    pub trip: PathBuf,
    pub split_policy: SplitPolicy,
    pub format: OutputFormat,
    pub currency: Option<String>,
}

impl AppConfig {
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from(Cli::parse())
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let split_policy = if cli.strict_splits {
            SplitPolicy::Strict
        } else {
            SplitPolicy::PassThrough
        };
        Self {
            trip: cli.trip,
            split_policy,
            format: cli.format,
            currency: cli.currency,
        }
    }
}
