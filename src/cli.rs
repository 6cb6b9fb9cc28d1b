use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::ClientSettings;

pub mod commands;

use commands::{batch, predict};

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(about = "Inventory prediction client: submit market conditions, get stock forecasts")]
#[command(version)]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Prediction endpoint URL (overrides configuration)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds, 0 disables it (overrides configuration)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Raw form values. Numeric fields are parsed leniently, the same way the
/// dashboard form parses them.
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Calendar date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Daily sales as a fraction, e.g. 0.034
    #[arg(long, allow_hyphen_values = true)]
    pub daily_sales_percentage: String,

    /// Market share percentage
    #[arg(long, allow_hyphen_values = true)]
    pub market_share: String,

    /// Political factor (0 or 1)
    #[arg(long, allow_hyphen_values = true)]
    pub political: String,

    /// Marketing factor (0 or 1)
    #[arg(long, allow_hyphen_values = true)]
    pub marketing: String,

    /// Budget amount
    #[arg(long, allow_hyphen_values = true)]
    pub budget: String,

    /// Machinery type
    #[arg(long)]
    pub machineries: String,

    /// Region
    #[arg(long)]
    pub region: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit one prediction request and print the summary cards
    Predict(PredictArgs),
    /// Submit every record of a JSON array in order and print the history
    ///
    /// Each record maps field names (e.g. "market_share") to a string or
    /// number. Records fill the same form in turn, so a field left out of a
    /// record keeps the previous record's value. Failed submissions are
    /// reported and do not change the accumulated history.
    Batch {
        /// Path to the JSON file
        #[arg(short, long)]
        input: PathBuf,
    },
}

impl Cli {
    pub fn settings(&self) -> Result<ClientSettings> {
        let mut settings = ClientSettings::load(self.config.as_deref())?;
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        Ok(settings)
    }

    pub async fn run(self) -> Result<()> {
        let settings = self.settings()?;
        match self.command {
            Commands::Predict(args) => {
                predict(&settings, &args).await?;
            }
            Commands::Batch { input } => {
                batch(&settings, &input).await?;
            }
        }
        Ok(())
    }
}
