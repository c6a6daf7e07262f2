//! Trait and types for the public player-statistics provider.

use anyhow::Result;
use chrono::NaiveDate;

/// Game-log columns kept for player comparison, in display order.
pub const GAME_LOG_COLUMNS: [&str; 20] = [
    "MIN", "FGM", "FGA", "FG_PCT", "FG3M", "FG3A", "FG3_PCT", "FTM", "FTA", "FT_PCT", "OREB",
    "DREB", "REB", "AST", "STL", "BLK", "TOV", "PF", "PTS", "PLUS_MINUS",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u64,
    pub full_name: String,
    pub is_active: bool,
}

/// One game of a player's log.
#[derive(Debug, Clone, PartialEq)]
pub struct GameLogEntry {
    pub game_date: Option<NaiveDate>,
    /// Values aligned with [`GAME_LOG_COLUMNS`].
    pub values: [Option<f64>; GAME_LOG_COLUMNS.len()],
}

impl GameLogEntry {
    pub fn get(&self, column: &str) -> Option<f64> {
        let i = GAME_LOG_COLUMNS.iter().position(|c| *c == column)?;
        self.values[i]
    }
}

/// Abstraction over a player statistics provider (e.g. stats.nba.com).
#[async_trait::async_trait]
pub trait PlayerStatsApi: Send + Sync {
    /// All players on a current roster.
    async fn active_players(&self) -> Result<Vec<Player>>;

    /// Regular-season game log of `player_id` for `season` (e.g. `"2024-25"`).
    async fn game_log(&self, player_id: u64, season: &str) -> Result<Vec<GameLogEntry>>;
}
