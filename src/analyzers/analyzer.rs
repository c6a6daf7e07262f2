use crate::analyzers::aggregate::{rank_week, stack_weeks};
use crate::analyzers::matchup::matchup_results;
use crate::analyzers::types::{MatchupResult, RankedTeamWeek, Standing, TeamLogo};
use crate::output::{self, DataFiles};
use crate::parser::Matchup;
use crate::parser::yahoo::{parse_current_week, parse_scoreboard, parse_standings, parse_team_logo};
use crate::services::league_api::LeagueApi;
use crate::stats::TeamWeekRecord;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Row counts written by [`refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub current_week: u32,
    pub season_rows: usize,
    pub standings: usize,
    pub matchups: usize,
    pub logos: usize,
}

pub async fn current_week<A: LeagueApi + ?Sized>(api: &A) -> Result<u32> {
    parse_current_week(&api.metadata().await?)
}

/// Scoreboard of `week` as typed matchups.
pub async fn week_matchups<A: LeagueApi + ?Sized>(api: &A, week: u32) -> Result<Vec<Matchup>> {
    let response = api.scoreboard(week).await?;
    parse_scoreboard(&response).with_context(|| format!("malformed scoreboard for week {week}"))
}

/// One record per team, matchup by matchup. Within a matchup the second
/// listed team comes first, which decides the order of equal adjusted ranks.
pub fn flatten_week(matchups: Vec<Matchup>) -> Vec<TeamWeekRecord> {
    matchups
        .into_iter()
        .flat_map(|m| m.teams.into_iter().rev())
        .collect()
}

/// Flattens and ranks every team's line for `week`.
#[tracing::instrument(skip(api))]
pub async fn weekly_matchup_stats<A: LeagueApi + ?Sized>(
    api: &A,
    week: u32,
) -> Result<Vec<RankedTeamWeek>> {
    let records = flatten_week(week_matchups(api, week).await?);

    info!(teams = records.len(), "Week flattened");
    Ok(rank_week(records))
}

/// Ranks weeks 1 through `through_week` one after another and stacks them.
pub async fn season_stats<A: LeagueApi + ?Sized>(
    api: &A,
    through_week: u32,
) -> Result<Vec<RankedTeamWeek>> {
    let mut weeks = Vec::with_capacity(through_week as usize);
    for week in 1..=through_week {
        weeks.push(weekly_matchup_stats(api, week).await?);
    }
    Ok(stack_weeks(weeks))
}

pub async fn standings<A: LeagueApi + ?Sized>(api: &A) -> Result<Vec<Standing>> {
    parse_standings(&api.standings().await?).context("malformed standings")
}

/// Category-win results for `week`.
pub async fn matchups<A: LeagueApi + ?Sized>(api: &A, week: u32) -> Result<Vec<MatchupResult>> {
    Ok(matchup_results(&week_matchups(api, week).await?))
}

/// Fetches the logo of every standings team that has a key.
///
/// Teams whose details carry no logo are logged and skipped.
pub async fn team_logos<A: LeagueApi + ?Sized>(
    api: &A,
    standings: &[Standing],
) -> Result<Vec<TeamLogo>> {
    let mut logos = Vec::new();
    for standing in standings {
        let Some(team_key) = standing.team_key.as_deref() else {
            continue;
        };
        let details = api.team(team_key).await?;
        match parse_team_logo(&details) {
            Some(url) => logos.push(TeamLogo {
                team: standing.name.clone().unwrap_or_else(|| team_key.to_string()),
                url,
            }),
            None => warn!(team_key, "Team has no logo"),
        }
    }
    Ok(logos)
}

/// Runs a full fetch and aggregate cycle and writes every table under `data_dir`.
///
/// Any failed request aborts the cycle before files are written.
#[tracing::instrument(skip(api), fields(league = api.league_key()))]
pub async fn refresh<A: LeagueApi + ?Sized>(api: &A, data_dir: &Path) -> Result<RefreshSummary> {
    let week = current_week(api).await?;
    info!(current_week = week, "Refreshing league data");

    let season = season_stats(api, week).await?;
    let standings = standings(api).await?;
    let matchups = matchups(api, week).await?;
    let logos = team_logos(api, &standings).await?;

    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    let files = DataFiles::new(data_dir);
    output::write_season_stats(&files.season, &season)?;
    output::write_table(&files.standings, &standings)?;
    output::write_table(&files.matchups, &matchups)?;
    output::write_table(&files.logos, &logos)?;

    let summary = RefreshSummary {
        current_week: week,
        season_rows: season.len(),
        standings: standings.len(),
        matchups: matchups.len(),
        logos: logos.len(),
    };
    info!(?summary, dir = %data_dir.display(), "Refresh complete");
    Ok(summary)
}
