//! Side-by-side player comparison over a recent window of games.

use anyhow::{Result, bail};
use chrono::{NaiveDate, TimeDelta};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::analyzers::types::PlayerSummary;
use crate::analyzers::utility::{mean, round_to};
use crate::services::player_api::{GAME_LOG_COLUMNS, GameLogEntry, PlayerStatsApi};

/// Percentage columns and the attempt column that qualifies a game for them.
const PCT_COLUMNS: [(&str, &str); 3] = [
    ("FG_PCT", "FGA"),
    ("FG3_PCT", "FG3A"),
    ("FT_PCT", "FTA"),
];

/// Which games a comparison covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Games within the last N days.
    LastDays(i64),
    Season,
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "season" => Ok(Period::Season),
            other => match other.parse::<i64>() {
                Ok(days) if days > 0 => Ok(Period::LastDays(days)),
                _ => bail!("period must be a positive number of days or \"season\", got {s:?}"),
            },
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::LastDays(days) => write!(f, "Last {days} Days"),
            Period::Season => write!(f, "Full Season"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Per-game averages; percentages over games with attempts.
    Average,
    /// Period totals; percentages omitted.
    Total,
}

/// Keeps the games of `log` that fall inside `period`, relative to `today`.
///
/// A window of N days keeps games dated strictly after `today - N`; games
/// with no parseable date only survive a full-season period. A window
/// reaching past the earliest representable date covers every dated game.
pub fn filter_period(log: &[GameLogEntry], period: Period, today: NaiveDate) -> Vec<&GameLogEntry> {
    match period {
        Period::Season => log.iter().collect(),
        Period::LastDays(days) => {
            let cutoff = TimeDelta::try_days(days).and_then(|d| today.checked_sub_signed(d));
            let Some(cutoff) = cutoff else {
                return log.iter().filter(|g| g.game_date.is_some()).collect();
            };
            log.iter()
                .filter(|g| g.game_date.is_some_and(|d| d > cutoff))
                .collect()
        }
    }
}

/// Aggregates `games` into one line. Returns `None` when there are no games.
pub fn summarize(
    player: &str,
    player_id: u64,
    games: &[&GameLogEntry],
    mode: Mode,
) -> Option<PlayerSummary> {
    if games.is_empty() {
        return None;
    }

    let column = |name: &str| -> Vec<f64> { games.iter().filter_map(|g| g.get(name)).collect() };
    let pct_attempts = |name: &str| PCT_COLUMNS.iter().find(|(pct, _)| *pct == name).map(|(_, att)| *att);

    let mut stats = Vec::with_capacity(GAME_LOG_COLUMNS.len());
    for name in GAME_LOG_COLUMNS {
        match (mode, pct_attempts(name)) {
            (Mode::Average, Some(attempts)) => {
                let qualifying: Vec<f64> = games
                    .iter()
                    .filter(|g| g.get(attempts).is_some_and(|a| a > 0.0))
                    .filter_map(|g| g.get(name))
                    .collect();
                let value = if qualifying.is_empty() {
                    0.0
                } else {
                    round_to(mean(&qualifying), 3)
                };
                stats.push((name, value));
            }
            (Mode::Average, None) => stats.push((name, round_to(mean(&column(name)), 1))),
            (Mode::Total, Some(_)) => {}
            (Mode::Total, None) => stats.push((name, round_to(column(name).iter().sum::<f64>(), 1))),
        }
    }

    Some(PlayerSummary {
        player: player.to_string(),
        player_id,
        headshot: headshot_url(player_id),
        games: games.len(),
        stats,
    })
}

pub fn headshot_url(player_id: u64) -> String {
    format!("https://cdn.nba.com/headshots/nba/latest/1040x760/{player_id}.png")
}

/// Fetches and summarizes each named player, in the order given.
///
/// Names missing from the active-player index and players without games in
/// the period are left out of the result.
#[tracing::instrument(skip(api, names), fields(players = names.len()))]
pub async fn compare_players<A: PlayerStatsApi + ?Sized>(
    api: &A,
    names: &[String],
    season: &str,
    period: Period,
    mode: Mode,
    today: NaiveDate,
) -> Result<Vec<PlayerSummary>> {
    let index: HashMap<String, u64> = api
        .active_players()
        .await?
        .into_iter()
        .map(|p| (p.full_name.to_lowercase(), p.id))
        .collect();

    let mut out = Vec::new();
    for name in names {
        let Some(&player_id) = index.get(&name.to_lowercase()) else {
            warn!(player = %name, "Player not found among active players");
            continue;
        };

        let log = api.game_log(player_id, season).await?;
        let games = filter_period(&log, period, today);

        match summarize(name, player_id, &games, mode) {
            Some(summary) => out.push(summary),
            None => info!(player = %name, %period, "No games in period"),
        }
    }
    Ok(out)
}
