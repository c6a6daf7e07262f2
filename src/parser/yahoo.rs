//! Typed extraction from Yahoo Fantasy API JSON responses.
//!
//! The API nests most collections as objects keyed `"0"`, `"1"`, ... next to
//! a `"count"` entry, and spreads a team's scalar fields over a list of
//! single-key objects. Structural paths that must exist (the scoreboard, the
//! standings table) fail the parse; individual fields that are absent come
//! back as `None`.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::debug;

use crate::analyzers::types::Standing;
use crate::stats::{
    Category, FGM_A_STAT_ID, FTM_A_STAT_ID, TeamWeekRecord, coerce_count, coerce_number,
    coerce_text,
};

static NULL: Value = Value::Null;

/// A head-to-head pairing from a weekly scoreboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matchup {
    pub id: String,
    pub teams: Vec<TeamWeekRecord>,
    pub stat_winners: Vec<StatWinner>,
}

/// One category's result inside a matchup. Tied categories carry no winner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatWinner {
    pub stat_id: Option<String>,
    pub winner_team_key: Option<String>,
}

/// Returns the numbered entries of a collection object in index order,
/// skipping `"count"` and any other non-numeric key.
pub fn numbered(collection: &Value) -> Vec<(usize, &Value)> {
    let Some(map) = collection.as_object() else {
        return Vec::new();
    };
    let mut entries: Vec<(usize, &Value)> = map
        .iter()
        .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, v)))
        .collect();
    entries.sort_by_key(|(i, _)| *i);
    entries
}

/// First value stored under `key` among the objects of `list`.
fn find_key<'a>(list: &'a Value, key: &str) -> Option<&'a Value> {
    list.as_array()?.iter().find_map(|item| item.get(key))
}

/// `fantasy_content.league[1]`, where league sub-resources live.
fn league_resource(response: &Value) -> Option<&Value> {
    response.get("fantasy_content")?.get("league")?.get(1)
}

/// Flattens one `team` array from a scoreboard into a [`TeamWeekRecord`].
pub fn parse_team_week(team: &Value) -> TeamWeekRecord {
    let mut record = TeamWeekRecord::default();

    if let Some(meta) = team.get(0) {
        record.team_key = find_key(meta, "team_key").and_then(coerce_text);
        record.team_id = find_key(meta, "team_id").and_then(coerce_count);
        record.name = find_key(meta, "name").and_then(coerce_text);
    }

    if let Some(team_stats) = find_key(team, "team_stats") {
        record.week = team_stats.get("week").and_then(coerce_count);

        let stats = team_stats.get("stats").and_then(Value::as_array);
        for stat in stats.into_iter().flatten() {
            let Some(stat) = stat.get("stat") else {
                continue;
            };
            let Some(stat_id) = stat.get("stat_id").and_then(coerce_text) else {
                continue;
            };
            let value = stat.get("value").unwrap_or(&NULL);

            match stat_id.as_str() {
                FGM_A_STAT_ID => record.fgm_a = coerce_text(value),
                FTM_A_STAT_ID => record.ftm_a = coerce_text(value),
                id => match Category::from_stat_id(id) {
                    Some(category) => record.values.set(category, coerce_number(value)),
                    None => debug!(stat_id = id, "Dropping untracked stat"),
                },
            }
        }
    }

    if let Some(total) = find_key(team, "team_remaining_games").and_then(|g| g.get("total")) {
        record.remaining_games = total.get("remaining_games").and_then(coerce_count);
        record.live_games = total.get("live_games").and_then(coerce_count);
        record.completed_games = total.get("completed_games").and_then(coerce_count);
    }

    record
}

/// Extracts every matchup of a `league/{key}/scoreboard` response.
pub fn parse_scoreboard(response: &Value) -> Result<Vec<Matchup>> {
    let matchups = league_resource(response)
        .and_then(|l| l.get("scoreboard"))
        .and_then(|s| s.get("0"))
        .and_then(|s| s.get("matchups"))
        .ok_or_else(|| anyhow!("scoreboard response has no matchups"))?;

    let out = numbered(matchups)
        .into_iter()
        .filter_map(|(id, entry)| entry.get("matchup").map(|m| (id, m)))
        .map(|(id, matchup)| {
            let teams = matchup
                .get("0")
                .and_then(|m| m.get("teams"))
                .map(numbered)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(_, t)| t.get("team"))
                .map(parse_team_week)
                .collect();

            let stat_winners = matchup
                .get("stat_winners")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(|w| w.get("stat_winner"))
                .map(|w| StatWinner {
                    stat_id: w.get("stat_id").and_then(coerce_text),
                    winner_team_key: w.get("winner_team_key").and_then(coerce_text),
                })
                .collect();

            Matchup {
                id: id.to_string(),
                teams,
                stat_winners,
            }
        })
        .collect();

    Ok(out)
}

/// Reads `current_week` from a `league/{key}` metadata response.
pub fn parse_current_week(response: &Value) -> Result<u32> {
    response
        .get("fantasy_content")
        .and_then(|c| c.get("league"))
        .and_then(|l| l.get(0))
        .and_then(|l| l.get("current_week"))
        .and_then(coerce_count)
        .context("league response has no current_week")
}

/// Collects league keys from a `users;use_login=1/games/leagues` response,
/// in the order the API lists them.
///
/// Only the newest game (highest `game_key`, i.e. the latest season) is
/// read, so leagues from past seasons never come first.
pub fn parse_league_keys(response: &Value) -> Vec<String> {
    let games = response
        .get("fantasy_content")
        .and_then(|c| c.get("users"))
        .and_then(|u| u.get("0"))
        .and_then(|u| u.get("user"))
        .and_then(|u| find_key(u, "games"));

    let mut newest: Option<(u32, Vec<String>)> = None;
    for (_, game) in games.map(numbered).unwrap_or_default() {
        let Some(game) = game.get("game") else {
            continue;
        };
        let game_key = find_key(game, "game_key").and_then(coerce_count).unwrap_or(0);

        let leagues = find_key(game, "leagues");
        let keys: Vec<String> = leagues
            .map(numbered)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(_, league)| {
                league
                    .get("league")
                    .and_then(|l| find_key(l, "league_key"))
                    .and_then(coerce_text)
            })
            .collect();

        if newest.as_ref().is_none_or(|(key, _)| game_key > *key) {
            newest = Some((game_key, keys));
        }
    }
    newest.map(|(_, keys)| keys).unwrap_or_default()
}

/// Extracts the standings table from a `league/{key}/standings` response.
pub fn parse_standings(response: &Value) -> Result<Vec<Standing>> {
    let teams = league_resource(response)
        .and_then(|l| l.get("standings"))
        .and_then(|s| s.get(0))
        .and_then(|s| s.get("teams"))
        .ok_or_else(|| anyhow!("standings response has no teams"))?;

    let out = numbered(teams)
        .into_iter()
        .filter_map(|(_, t)| t.get("team"))
        .map(|team| {
            let meta = team.get(0).unwrap_or(&NULL);
            let standings = find_key(team, "team_standings").unwrap_or(&NULL);
            let totals = standings.get("outcome_totals").unwrap_or(&NULL);

            Standing {
                team_key: find_key(meta, "team_key").and_then(coerce_text),
                name: find_key(meta, "name").and_then(coerce_text),
                rank: standings.get("rank").and_then(coerce_count),
                playoff_seed: standings.get("playoff_seed").and_then(coerce_count),
                wins: totals.get("wins").and_then(coerce_count),
                losses: totals.get("losses").and_then(coerce_count),
                ties: totals.get("ties").and_then(coerce_count),
                percentage: totals.get("percentage").and_then(coerce_number),
                games_back: standings.get("games_back").and_then(coerce_number),
            }
        })
        .collect();

    Ok(out)
}

/// First logo URL in a `team/{key}` response.
pub fn parse_team_logo(response: &Value) -> Option<String> {
    let meta = response.get("fantasy_content")?.get("team")?.get(0)?;
    find_key(meta, "team_logos")?
        .as_array()?
        .iter()
        .find_map(|l| l.get("team_logo")?.get("url"))
        .and_then(coerce_text)
}
