//! Command-line and environment configuration.
//!
//! Values come from flags first and environment variables second; `main`
//! loads a `.env` file before parsing. Secrets are validated before any
//! request is made.

use anyhow::{Result, bail};
use clap::Args;
use std::path::PathBuf;

/// Where the OAuth keypair comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypairSource {
    /// Keypair JSON passed directly, e.g. through a secret env var.
    Inline(String),
    /// Keypair JSON file; refreshed tokens are written back to it.
    File(PathBuf),
}

/// Settings needed to reach the fantasy league.
#[derive(Args, Debug, Clone)]
pub struct LeagueSettings {
    /// OAuth keypair JSON (takes precedence over --keypair-path)
    #[arg(long, env = "KEYPAIR_JSON", hide_env_values = true)]
    pub keypair_json: Option<String>,

    /// Path to the OAuth keypair JSON file
    #[arg(long, env = "KEYPAIR_PATH", default_value = "/etc/secrets/keypair.json")]
    pub keypair_path: PathBuf,

    /// League key to read (defaults to the account's first NBA league)
    #[arg(long, env = "LEAGUE_KEY")]
    pub league_key: Option<String>,
}

impl LeagueSettings {
    /// Resolves and checks the keypair location.
    ///
    /// Fails when no inline keypair is set and the keypair file is missing.
    pub fn keypair_source(&self) -> Result<KeypairSource> {
        if let Some(json) = self.keypair_json.as_deref() {
            if json.trim().is_empty() {
                bail!("KEYPAIR_JSON is set but empty");
            }
            return Ok(KeypairSource::Inline(json.to_string()));
        }
        if !self.keypair_path.is_file() {
            bail!(
                "Secret file {} not found. Set KEYPAIR_JSON or KEYPAIR_PATH.",
                self.keypair_path.display()
            );
        }
        Ok(KeypairSource::File(self.keypair_path.clone()))
    }

    pub fn league_key(&self) -> Option<String> {
        self.league_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }
}

/// Location of the persisted CSV tables.
#[derive(Args, Debug, Clone)]
pub struct DataSettings {
    /// Directory holding the season, standings, matchup and logo CSVs
    #[arg(short = 'd', long, env = "DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,
}
