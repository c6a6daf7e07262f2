//! Parsing of NBA stats API result sets.
//!
//! Every endpoint answers with one or more tables of the shape
//! `{"name": ..., "headers": [...], "rowSet": [[...], ...]}`.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::services::player_api::{GAME_LOG_COLUMNS, GameLogEntry, Player};
use crate::stats::{coerce_count, coerce_number, coerce_text};

/// Date format of the `GAME_DATE` column, e.g. `"MAR 01, 2025"`.
const GAME_DATE_FORMAT: &str = "%b %d, %Y";

#[derive(Debug, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(header))
    }

    fn cell<'a>(&self, row: &'a [Value], column: Option<usize>) -> Option<&'a Value> {
        row.get(column?)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "resultSets", alias = "resultSet")]
    result_sets: Vec<ResultSet>,
}

/// Returns the first result set of a stats API response.
pub fn first_result_set(body: &str) -> Result<ResultSet> {
    let envelope: Envelope = serde_json::from_str(body)?;
    envelope
        .result_sets
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("stats response contains no result sets"))
}

/// Reads the player index from a `commonallplayers` result set.
///
/// Rows without an id or a display name are skipped.
pub fn parse_players(set: &ResultSet) -> Vec<Player> {
    let id = set.column("PERSON_ID");
    let name = set.column("DISPLAY_FIRST_LAST");
    let status = set.column("ROSTERSTATUS");

    set.rows
        .iter()
        .filter_map(|row| {
            Some(Player {
                id: set.cell(row, id).and_then(coerce_count)? as u64,
                full_name: set.cell(row, name).and_then(coerce_text)?,
                is_active: set
                    .cell(row, status)
                    .and_then(coerce_number)
                    .is_some_and(|s| s == 1.0),
            })
        })
        .collect()
}

/// Reads a `playergamelog` result set into per-game entries.
///
/// Unparseable dates and non-numeric cells become `None`.
pub fn parse_game_log(set: &ResultSet) -> Vec<GameLogEntry> {
    let date = set.column("GAME_DATE");
    let columns: Vec<Option<usize>> = GAME_LOG_COLUMNS.iter().map(|c| set.column(c)).collect();

    set.rows
        .iter()
        .map(|row| {
            let game_date = set
                .cell(row, date)
                .and_then(Value::as_str)
                .and_then(parse_game_date);
            let mut values = [None; GAME_LOG_COLUMNS.len()];
            for (slot, column) in values.iter_mut().zip(&columns) {
                *slot = set.cell(row, *column).and_then(coerce_number);
            }
            GameLogEntry { game_date, values }
        })
        .collect()
}

fn parse_game_date(s: &str) -> Option<NaiveDate> {
    // the API upper-cases month names; chrono matches them case-insensitively
    NaiveDate::parse_from_str(s.trim(), GAME_DATE_FORMAT).ok()
}
