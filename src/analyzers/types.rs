//! Data types produced by the ranking and matchup pipelines.

use serde::{Deserialize, Serialize};

use crate::stats::{CategoryLine, TeamWeekRecord};

/// A [`TeamWeekRecord`] annotated with its per-category and summary ranks.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTeamWeek {
    pub record: TeamWeekRecord,
    /// Fractional rank per category within the week; missing where the value is.
    pub ranks: CategoryLine,
    /// Sum of the present category ranks. Lower is better.
    pub aggregate_rank: f64,
    /// Min-rank of `aggregate_rank` within the week, starting at 1.
    pub adjusted_rank: u32,
}

/// Outcome of one head-to-head pairing, counted in categories won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupResult {
    pub matchup_id: String,
    /// The side with at least as many category wins as the other.
    pub team_a_key: String,
    pub team_a: String,
    pub team_a_wins: u32,
    pub team_b_key: String,
    pub team_b: String,
    pub team_b_wins: u32,
    /// Leading team's name, or [`TIE`](crate::analyzers::matchup::TIE).
    pub lead: String,
}

impl MatchupResult {
    pub fn label(&self) -> String {
        format!("{} vs. {}", self.team_a, self.team_b)
    }

    pub fn score(&self) -> String {
        format!("{} - {}", self.team_a_wins, self.team_b_wins)
    }
}

/// Season-to-date standing of one team, as reported by the league.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_key: Option<String>,
    pub name: Option<String>,
    pub rank: Option<u32>,
    pub playoff_seed: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
    pub percentage: Option<f64>,
    pub games_back: Option<f64>,
}

impl Standing {
    /// `W-L-T`, with `?` in place of any missing count.
    pub fn record(&self) -> String {
        let part = |v: Option<u32>| v.map_or_else(|| "?".to_string(), |n| n.to_string());
        format!("{}-{}-{}", part(self.wins), part(self.losses), part(self.ties))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLogo {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Logo URL")]
    pub url: String,
}

/// One player's aggregated line over a comparison period.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    pub player: String,
    pub player_id: u64,
    pub headshot: String,
    pub games: usize,
    /// Column name and value, in game-log column order.
    pub stats: Vec<(&'static str, f64)>,
}

impl PlayerSummary {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.stats
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, v)| *v)
    }
}
