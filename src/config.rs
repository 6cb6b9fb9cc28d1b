use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Settings for the command-line prediction client.
///
/// Sources, lowest precedence first: built-in defaults, `stockcast.toml` in
/// the working directory, an explicit `--config` file, `STOCKCAST_*`
/// environment variables (a `.env` file is loaded first).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientSettings {
    /// Absolute URL of the prediction endpoint
    pub endpoint: String,
    /// Per-request timeout in milliseconds, 0 disables it
    pub timeout_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: common::DEFAULT_PREDICT_URL.to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl ClientSettings {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("timeout_ms", defaults.timeout_ms as i64)?
            .add_source(File::with_name("stockcast").required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: ClientSettings = builder
            .add_source(Environment::with_prefix("STOCKCAST").try_parsing(true))
            .build()
            .context("Failed to load client configuration")?
            .try_deserialize()
            .context("Invalid client configuration")?;

        tracing::debug!(?settings, "client settings loaded");
        Ok(settings)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}
