use anyhow::{Result, bail};
use approx::assert_relative_eq;
use async_trait::async_trait;
use fantasy_hoops::analyzers::aggregate::{latest_week, week_rows};
use fantasy_hoops::analyzers::analyzer::{RefreshSummary, refresh};
use fantasy_hoops::analyzers::types::{MatchupResult, RankedTeamWeek, Standing, TeamLogo};
use fantasy_hoops::output::{DataFiles, read_season_stats, read_table};
use fantasy_hoops::report::{render_leaderboard, render_standings};
use fantasy_hoops::services::LeagueApi;
use fantasy_hoops::stats::Category;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;

const LEAGUE_KEY: &str = "454.l.74601";

/// Serves recorded league responses; `current_week` past the recorded
/// scoreboards makes the fetch fail.
struct FixtureLeague {
    current_week: u32,
}

#[async_trait]
impl LeagueApi for FixtureLeague {
    fn league_key(&self) -> &str {
        LEAGUE_KEY
    }

    async fn metadata(&self) -> Result<Value> {
        Ok(json!({"fantasy_content": {"league": [
            {"league_key": LEAGUE_KEY, "current_week": self.current_week.to_string()}
        ]}}))
    }

    async fn scoreboard(&self, week: u32) -> Result<Value> {
        let body = match week {
            1 => include_str!("fixtures/scoreboard_week1.json"),
            2 => include_str!("fixtures/scoreboard_week2.json"),
            _ => bail!("no scoreboard recorded for week {week}"),
        };
        Ok(serde_json::from_str(body)?)
    }

    async fn standings(&self) -> Result<Value> {
        Ok(serde_json::from_str(include_str!("fixtures/standings.json"))?)
    }

    async fn team(&self, team_key: &str) -> Result<Value> {
        // Team 4 never uploaded a logo.
        let logos = if team_key.ends_with(".t.4") {
            json!([])
        } else {
            json!([{"team_logo": {"size": "large", "url": format!("https://s.yimg.com/logo/{team_key}.png")}}])
        };
        Ok(json!({"fantasy_content": {"team": [[
            {"team_key": team_key},
            {"team_logos": logos}
        ]]}}))
    }
}

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn names(rows: &[&RankedTeamWeek]) -> Vec<String> {
    rows.iter()
        .map(|r| r.record.name.clone().unwrap_or_default())
        .collect()
}

#[tokio::test]
async fn test_refresh_writes_every_table() {
    let dir = fresh_dir("fantasy_hoops_it_refresh");
    let api = FixtureLeague { current_week: 2 };

    let summary = refresh(&api, &dir).await.expect("refresh failed");
    assert_eq!(
        summary,
        RefreshSummary {
            current_week: 2,
            season_rows: 8,
            standings: 4,
            matchups: 2,
            logos: 3,
        }
    );

    let files = DataFiles::new(&dir);
    for path in [&files.season, &files.standings, &files.matchups, &files.logos] {
        assert!(path.is_file(), "{} missing", path.display());
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_season_table_ranks_each_week() {
    let dir = fresh_dir("fantasy_hoops_it_season");
    refresh(&FixtureLeague { current_week: 2 }, &dir)
        .await
        .expect("refresh failed");

    let rows = read_season_stats(&DataFiles::new(&dir).season).unwrap();
    assert_eq!(latest_week(&rows), Some(2));

    let week2 = week_rows(&rows, 2);
    assert_eq!(
        names(&week2),
        vec!["Sam's Swag Team", "Han Da Dons", "darius", "Tyshiii"]
    );
    let aggregates: Vec<f64> = week2.iter().map(|r| r.aggregate_rank).collect();
    for (got, want) in aggregates.iter().zip([16.0, 17.0, 21.0, 32.0]) {
        assert_relative_eq!(*got, want);
    }
    let adjusted: Vec<u32> = week2.iter().map(|r| r.adjusted_rank).collect();
    assert_eq!(adjusted, vec![1, 2, 3, 4]);

    // Tyshiii reported no turnovers, so there is no TO rank and the other
    // three are ranked among themselves, fewest first.
    let tyshiii = week2[3];
    assert_eq!(tyshiii.record.values.get(Category::To), None);
    assert_eq!(tyshiii.ranks.get(Category::To), None);
    assert_eq!(week2[2].ranks.get(Category::To), Some(1.0));

    assert_eq!(week2[0].record.fgm_a.as_deref(), Some("190/396"));
    assert_eq!(week2[0].record.ftm_a.as_deref(), Some("80/100"));
    assert_eq!(week2[0].record.remaining_games, Some(3));

    // Week 1 has the first two teams' lines swapped.
    let week1 = week_rows(&rows, 1);
    assert_eq!(
        names(&week1),
        vec!["darius", "Han Da Dons", "Sam's Swag Team", "Tyshiii"]
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_matchups_standings_and_logos() {
    let dir = fresh_dir("fantasy_hoops_it_tables");
    refresh(&FixtureLeague { current_week: 2 }, &dir)
        .await
        .expect("refresh failed");
    let files = DataFiles::new(&dir);

    let matchups: Vec<MatchupResult> = read_table(&files.matchups).unwrap();
    assert_eq!(matchups[0].team_a, "Sam's Swag Team");
    assert_eq!(matchups[0].score(), "6 - 3");
    assert_eq!(matchups[0].lead, "Sam's Swag Team");
    assert_eq!(matchups[1].label(), "Han Da Dons vs. Tyshiii");
    assert_eq!(matchups[1].score(), "4 - 4");
    assert_eq!(matchups[1].lead, "Tie");

    let standings: Vec<Standing> = read_table(&files.standings).unwrap();
    assert_eq!(standings.len(), 4);
    assert_eq!(standings[1].name.as_deref(), Some("Han Da Dons"));
    assert_eq!(standings[1].record(), "2-1-1");
    assert_eq!(standings[1].rank, Some(2));
    assert_relative_eq!(standings[1].percentage.unwrap(), 0.625);
    assert_relative_eq!(standings[3].games_back.unwrap(), 2.5);

    let logos: Vec<TeamLogo> = read_table(&files.logos).unwrap();
    let teams: Vec<&str> = logos.iter().map(|l| l.team.as_str()).collect();
    assert_eq!(teams, vec!["Sam's Swag Team", "Han Da Dons", "darius"]);
    assert_eq!(
        logos[0].url,
        format!("https://s.yimg.com/logo/{LEAGUE_KEY}.t.1.png")
    );

    let view = render_standings(&standings, &logos);
    let leader = view.lines().nth(2).unwrap();
    assert!(leader.contains("Sam's Swag Team"));
    assert!(leader.ends_with(&logos[0].url));

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_failed_fetch_writes_nothing() {
    let dir = fresh_dir("fantasy_hoops_it_failure");

    let err = refresh(&FixtureLeague { current_week: 3 }, &dir)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("week 3"));
    assert!(!DataFiles::new(&dir).season.exists());
}

#[tokio::test]
async fn test_leaderboard_from_stored_table() {
    let dir = fresh_dir("fantasy_hoops_it_leaderboard");
    refresh(&FixtureLeague { current_week: 2 }, &dir)
        .await
        .expect("refresh failed");

    let rows = read_season_stats(&DataFiles::new(&dir).season).unwrap();
    let out = render_leaderboard(&rows, 2);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Week"));
    assert!(lines[2].contains("Sam's Swag Team"));
    assert!(lines[2].contains("1 (16)"));
    assert!(lines[2].contains("0.48 (1)"));

    fs::remove_dir_all(&dir).unwrap();
}
