use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::oauth::Keypair;
use crate::fetch::auth::{Bearer, QueryParam};
use crate::fetch::{BasicClient, fetch_json};
use crate::parser::yahoo::parse_league_keys;
use crate::services::league_api::LeagueApi;

const BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

/// Authenticated handle on one fantasy basketball league.
pub struct YahooLeague {
    http: QueryParam<Bearer<BasicClient>>,
    base_url: String,
    league_key: String,
}

impl YahooLeague {
    /// Builds the handle from an authenticated keypair.
    ///
    /// Without an explicit `league_key` the first NBA league of the logged-in
    /// user is used.
    pub async fn connect(keypair: &Keypair, league_key: Option<String>) -> Result<Self> {
        let http = QueryParam::new(
            Bearer::new(BasicClient::new()?, &keypair.access_token)?,
            "format",
            "json",
        );

        let mut league = Self {
            http,
            base_url: BASE_URL.to_string(),
            league_key: String::new(),
        };

        league.league_key = match league_key {
            Some(key) => key,
            None => league.discover_league().await?,
        };
        info!(league_key = %league.league_key, "League selected");

        Ok(league)
    }

    async fn discover_league(&self) -> Result<String> {
        let response = self
            .get("users;use_login=1/games;game_keys=nba/leagues")
            .await?;
        parse_league_keys(&response)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No NBA leagues found for this account"))
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        fetch_json(&self.http, &url)
            .await
            .with_context(|| format!("league API request failed: {path}"))
    }
}

#[async_trait]
impl LeagueApi for YahooLeague {
    fn league_key(&self) -> &str {
        &self.league_key
    }

    async fn metadata(&self) -> Result<Value> {
        self.get(&format!("league/{}", self.league_key)).await
    }

    async fn scoreboard(&self, week: u32) -> Result<Value> {
        self.get(&format!("league/{}/scoreboard;week={}", self.league_key, week))
            .await
    }

    async fn standings(&self) -> Result<Value> {
        self.get(&format!("league/{}/standings", self.league_key))
            .await
    }

    async fn team(&self, team_key: &str) -> Result<Value> {
        self.get(&format!("team/{}", team_key)).await
    }
}
