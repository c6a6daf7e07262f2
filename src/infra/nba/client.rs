use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use tracing::debug;

use crate::fetch::{BasicClient, fetch_text};
use crate::parser::nba::{first_result_set, parse_game_log, parse_players};
use crate::services::player_api::{GameLogEntry, Player, PlayerStatsApi};

const BASE_URL: &str = "https://stats.nba.com/stats";

/// Client for the public stats.nba.com endpoints.
///
/// The endpoints reject requests that do not look like they come from the
/// nba.com site, hence the fixed browser headers.
pub struct NbaStatsClient {
    http: BasicClient,
    base_url: String,
    season: String,
}

impl NbaStatsClient {
    /// `season` scopes the player index, e.g. `"2024-25"`.
    pub fn new(season: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
            ),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));

        Ok(Self {
            http: BasicClient::with_headers(headers)?,
            base_url: BASE_URL.to_string(),
            season: season.to_string(),
        })
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String> {
        let mut url = reqwest::Url::parse(&format!("{}/{}", self.base_url, endpoint))?;
        url.query_pairs_mut().extend_pairs(params);
        fetch_text(&self.http, url.as_str())
            .await
            .with_context(|| format!("stats API request failed: {endpoint}"))
    }
}

#[async_trait]
impl PlayerStatsApi for NbaStatsClient {
    #[tracing::instrument(skip(self), fields(season = %self.season))]
    async fn active_players(&self) -> Result<Vec<Player>> {
        let body = self
            .get(
                "commonallplayers",
                &[
                    ("LeagueID", "00"),
                    ("Season", self.season.as_str()),
                    ("IsOnlyCurrentSeason", "1"),
                ],
            )
            .await?;

        let players: Vec<Player> = parse_players(&first_result_set(&body)?)
            .into_iter()
            .filter(|p| p.is_active)
            .collect();
        debug!(count = players.len(), "Active players loaded");
        Ok(players)
    }

    #[tracing::instrument(skip(self))]
    async fn game_log(&self, player_id: u64, season: &str) -> Result<Vec<GameLogEntry>> {
        let id = player_id.to_string();
        let body = self
            .get(
                "playergamelog",
                &[
                    ("PlayerID", id.as_str()),
                    ("Season", season),
                    ("SeasonType", "Regular Season"),
                ],
            )
            .await?;

        let log = parse_game_log(&first_result_set(&body)?);
        debug!(games = log.len(), "Game log loaded");
        Ok(log)
    }
}
