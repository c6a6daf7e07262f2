//! CSV persistence of the ranked season table, standings, matchups and logos.
//!
//! Each refresh rewrites the files in full; the view commands read them back.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::analyzers::types::RankedTeamWeek;
use crate::stats::{Category, CategoryLine, TeamWeekRecord};

/// File names of the persisted tables inside a data directory.
pub struct DataFiles {
    pub season: PathBuf,
    pub standings: PathBuf,
    pub matchups: PathBuf,
    pub logos: PathBuf,
}

impl DataFiles {
    pub fn new(dir: &Path) -> Self {
        Self {
            season: dir.join("final.csv"),
            standings: dir.join("standings.csv"),
            matchups: dir.join("df_matchups.csv"),
            logos: dir.join("team_logos.csv"),
        }
    }
}

/// Flat CSV shape of a [`RankedTeamWeek`]. Missing values are empty cells.
#[derive(Debug, Serialize, Deserialize)]
struct SeasonRow {
    week: Option<u32>,
    team_key: Option<String>,
    team_id: Option<u32>,
    name: Option<String>,
    remaining_games: Option<u32>,
    live_games: Option<u32>,
    completed_games: Option<u32>,
    #[serde(rename = "FGM/A")]
    fgm_a: Option<String>,
    #[serde(rename = "FG%")]
    fg_pct: Option<f64>,
    #[serde(rename = "FTM/A")]
    ftm_a: Option<String>,
    #[serde(rename = "FT%")]
    ft_pct: Option<f64>,
    #[serde(rename = "3PTM")]
    three_ptm: Option<f64>,
    #[serde(rename = "PTS")]
    pts: Option<f64>,
    #[serde(rename = "REB")]
    reb: Option<f64>,
    #[serde(rename = "AST")]
    ast: Option<f64>,
    #[serde(rename = "STL")]
    stl: Option<f64>,
    #[serde(rename = "BLK")]
    blk: Option<f64>,
    #[serde(rename = "TO")]
    to: Option<f64>,
    #[serde(rename = "FG%_Rank")]
    fg_pct_rank: Option<f64>,
    #[serde(rename = "FT%_Rank")]
    ft_pct_rank: Option<f64>,
    #[serde(rename = "3PTM_Rank")]
    three_ptm_rank: Option<f64>,
    #[serde(rename = "PTS_Rank")]
    pts_rank: Option<f64>,
    #[serde(rename = "REB_Rank")]
    reb_rank: Option<f64>,
    #[serde(rename = "AST_Rank")]
    ast_rank: Option<f64>,
    #[serde(rename = "STL_Rank")]
    stl_rank: Option<f64>,
    #[serde(rename = "BLK_Rank")]
    blk_rank: Option<f64>,
    #[serde(rename = "TO_Rank")]
    to_rank: Option<f64>,
    #[serde(rename = "Aggregate Rank")]
    aggregate_rank: f64,
    #[serde(rename = "Adjusted_Rank")]
    adjusted_rank: u32,
}

impl From<&RankedTeamWeek> for SeasonRow {
    fn from(row: &RankedTeamWeek) -> Self {
        let r = &row.record;
        let v = |c| r.values.get(c);
        let rank = |c| row.ranks.get(c);
        Self {
            week: r.week,
            team_key: r.team_key.clone(),
            team_id: r.team_id,
            name: r.name.clone(),
            remaining_games: r.remaining_games,
            live_games: r.live_games,
            completed_games: r.completed_games,
            fgm_a: r.fgm_a.clone(),
            fg_pct: v(Category::FgPct),
            ftm_a: r.ftm_a.clone(),
            ft_pct: v(Category::FtPct),
            three_ptm: v(Category::ThreePtm),
            pts: v(Category::Pts),
            reb: v(Category::Reb),
            ast: v(Category::Ast),
            stl: v(Category::Stl),
            blk: v(Category::Blk),
            to: v(Category::To),
            fg_pct_rank: rank(Category::FgPct),
            ft_pct_rank: rank(Category::FtPct),
            three_ptm_rank: rank(Category::ThreePtm),
            pts_rank: rank(Category::Pts),
            reb_rank: rank(Category::Reb),
            ast_rank: rank(Category::Ast),
            stl_rank: rank(Category::Stl),
            blk_rank: rank(Category::Blk),
            to_rank: rank(Category::To),
            aggregate_rank: row.aggregate_rank,
            adjusted_rank: row.adjusted_rank,
        }
    }
}

impl From<SeasonRow> for RankedTeamWeek {
    fn from(row: SeasonRow) -> Self {
        let line = |values: [Option<f64>; 9]| {
            let mut line = CategoryLine::default();
            for (category, value) in Category::ALL.into_iter().zip(values) {
                line.set(category, value);
            }
            line
        };

        let values = line([
            row.fg_pct, row.ft_pct, row.three_ptm, row.pts, row.reb, row.ast, row.stl, row.blk,
            row.to,
        ]);
        let ranks = line([
            row.fg_pct_rank,
            row.ft_pct_rank,
            row.three_ptm_rank,
            row.pts_rank,
            row.reb_rank,
            row.ast_rank,
            row.stl_rank,
            row.blk_rank,
            row.to_rank,
        ]);

        RankedTeamWeek {
            record: TeamWeekRecord {
                week: row.week,
                team_key: row.team_key,
                team_id: row.team_id,
                name: row.name,
                remaining_games: row.remaining_games,
                live_games: row.live_games,
                completed_games: row.completed_games,
                fgm_a: row.fgm_a,
                ftm_a: row.ftm_a,
                values,
            },
            ranks,
            aggregate_rank: row.aggregate_rank,
            adjusted_rank: row.adjusted_rank,
        }
    }
}

/// Writes `rows` to `path` with a header line, replacing any existing file.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads every row of a CSV table written by [`write_table`].
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: T = result.with_context(|| format!("bad row in {}", path.display()))?;
        rows.push(record);
    }
    Ok(rows)
}

pub fn write_season_stats(path: &Path, rows: &[RankedTeamWeek]) -> Result<()> {
    let flat: Vec<SeasonRow> = rows.iter().map(SeasonRow::from).collect();
    write_table(path, &flat)
}

pub fn read_season_stats(path: &Path) -> Result<Vec<RankedTeamWeek>> {
    let flat: Vec<SeasonRow> = read_table(path)?;
    Ok(flat.into_iter().map(RankedTeamWeek::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::rank_week;
    use crate::analyzers::types::{MatchupResult, Standing};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_rows() -> Vec<RankedTeamWeek> {
        let team = |key: &str, pts: Option<f64>, to: Option<f64>| {
            let mut record = TeamWeekRecord {
                week: Some(2),
                team_key: Some(key.to_string()),
                team_id: Some(1),
                name: Some(format!("Team {key}")),
                fgm_a: Some("190/396".to_string()),
                ..Default::default()
            };
            record.values.set(Category::FgPct, Some(0.471));
            record.values.set(Category::Pts, pts);
            record.values.set(Category::To, to);
            record
        };
        rank_week(vec![
            team("a", Some(500.0), Some(60.0)),
            team("b", Some(520.0), Some(55.0)),
            team("c", None, Some(60.0)),
        ])
    }

    #[test]
    fn test_season_stats_round_trip_keeps_order() {
        let path = temp_path("fantasy_hoops_test_season.csv");
        let _ = fs::remove_file(&path);

        let rows = sample_rows();
        write_season_stats(&path, &rows).unwrap();
        let read = read_season_stats(&path).unwrap();

        assert_eq!(read, rows);
        let before: Vec<_> = rows.iter().map(|r| r.adjusted_rank).collect();
        let after: Vec<_> = read.iter().map(|r| r.adjusted_rank).collect();
        assert_eq!(before, after);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_season_header_uses_column_labels() {
        let path = temp_path("fantasy_hoops_test_header.csv");
        write_season_stats(&path, &sample_rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert!(header.starts_with("week,team_key,team_id,name,"));
        assert!(header.contains("FGM/A,FG%,FTM/A,FT%,3PTM"));
        assert!(header.ends_with("TO_Rank,Aggregate Rank,Adjusted_Rank"));
        // 1 header + 3 rows
        assert_eq!(content.lines().count(), 4);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_table_replaces_file() {
        let path = temp_path("fantasy_hoops_test_standings.csv");
        let standings = vec![Standing {
            name: Some("Tyshiii".into()),
            wins: Some(3),
            percentage: Some(0.6),
            ..Default::default()
        }];
        write_table(&path, &standings).unwrap();
        write_table(&path, &standings).unwrap();

        let read: Vec<Standing> = read_table(&path).unwrap();
        assert_eq!(read, standings);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_matchups_round_trip() {
        let path = temp_path("fantasy_hoops_test_matchups.csv");
        let matchups = vec![MatchupResult {
            matchup_id: "1".into(),
            team_a_key: "t.1".into(),
            team_a: "Sam's Swag Team".into(),
            team_a_wins: 5,
            team_b_key: "t.2".into(),
            team_b: "darius".into(),
            team_b_wins: 5,
            lead: "Tie".into(),
        }];
        write_table(&path, &matchups).unwrap();
        let read: Vec<MatchupResult> = read_table(&path).unwrap();
        assert_eq!(read, matchups);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_missing_file_is_error() {
        assert!(read_season_stats(Path::new("/nonexistent/final.csv")).is_err());
    }
}
