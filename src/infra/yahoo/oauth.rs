use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::KeypairSource;

const TOKEN_URL: &str = "https://api.login.yahoo.com/oauth2/get_token";

/// Access tokens live for an hour; they are treated as expired a minute early.
const TOKEN_VALID_SECS: f64 = 3540.0;

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Stored OAuth2 credentials for the fantasy API.
///
/// Same JSON layout as the keypair file written by the token tooling:
/// ```json
/// {
///   "consumer_key": "...",
///   "consumer_secret": "...",
///   "access_token": "...",
///   "refresh_token": "...",
///   "token_time": 1740000000.5,
///   "token_type": "bearer"
/// }
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Keypair {
    pub consumer_key: String,
    pub consumer_secret: String,
    #[serde(default)]
    pub access_token: String,
    pub refresh_token: String,
    /// Unix time (seconds) the access token was issued.
    #[serde(default)]
    pub token_time: f64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    token_type: Option<String>,
    #[serde(rename = "xoauth_yahoo_guid")]
    guid: Option<String>,
}

impl Keypair {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("keypair JSON is malformed")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Secret file {} not readable", path.display()))?;
        Self::from_json(&content)
    }

    /// Writes the keypair as JSON. On Unix the file is made owner-only.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let context = || format!("failed to write keypair to {}", path.display());

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(path).with_context(context)?;
        // mode() only applies when the file is created
        #[cfg(unix)]
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .with_context(context)?;
        file.write_all(json.as_bytes()).with_context(context)
    }

    /// Whether the access token can still be used at unix time `now`.
    pub fn token_is_valid(&self, now: f64) -> bool {
        !self.access_token.is_empty() && now - self.token_time < TOKEN_VALID_SECS
    }

    /// Exchanges the refresh token for a new access token.
    async fn refresh(&self) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let response = client
            .post(TOKEN_URL)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("redirect_uri", "oob"),
                ("refresh_token", self.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send token request: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Token refresh failed with status {}: {}", status, body));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse token response: {}", e))?;

        Ok(self.with_token(token, now_secs()))
    }

    fn with_token(&self, token: TokenResponse, now: f64) -> Self {
        Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token.unwrap_or_else(|| self.refresh_token.clone()),
            token_time: now,
            token_type: token.token_type.unwrap_or_else(|| self.token_type.clone()),
            guid: token.guid.or_else(|| self.guid.clone()),
            ..self.clone()
        }
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Loads the keypair and refreshes the access token if it has expired.
///
/// A refreshed keypair loaded from a file is written back to that file.
/// Every failure is reported as a single "OAuth authentication failed" error.
pub async fn authenticate(source: &KeypairSource) -> Result<Keypair> {
    load_fresh(source).await.context("OAuth authentication failed")
}

async fn load_fresh(source: &KeypairSource) -> Result<Keypair> {
    let keypair = match source {
        KeypairSource::Inline(json) => Keypair::from_json(json)?,
        KeypairSource::File(path) => Keypair::load(path)?,
    };

    if keypair.token_is_valid(now_secs()) {
        debug!("Stored access token still valid");
        return Ok(keypair);
    }

    info!("Refreshing expired access token");
    let refreshed = keypair.refresh().await?;

    if let KeypairSource::File(path) = source {
        refreshed.save(path)?;
        info!(path = %path.display(), "Refreshed token saved");
    }
    Ok(refreshed)
}
