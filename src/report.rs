//! Terminal rendering of the dashboard tables.

use crate::analyzers::aggregate::week_rows;
use crate::analyzers::types::{MatchupResult, PlayerSummary, RankedTeamWeek, Standing, TeamLogo};
use crate::analyzers::utility::round_to;
use crate::stats::Category;

/// Widest bar drawn by [`render_free_agency`].
const BAR_WIDTH: usize = 30;

/// Lays out `rows` under `headers` with space-padded columns.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

fn number(value: Option<f64>, places: i32) -> String {
    value.map_or_else(|| "-".to_string(), |v| round_to(v, places).to_string())
}

fn count(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// One leaderboard line: each category shown as `value (rank)`.
pub fn leaderboard_row(row: &RankedTeamWeek) -> Vec<String> {
    let r = &row.record;
    let mut cells = vec![
        count(r.week),
        r.name.clone().unwrap_or_default(),
        format!(
            "{}/{}/{}",
            count(r.remaining_games),
            count(r.live_games),
            count(r.completed_games)
        ),
        format!("{} ({})", row.adjusted_rank, row.aggregate_rank),
    ];
    for category in Category::ALL {
        cells.push(format!(
            "{} ({})",
            number(r.values.get(category), 3),
            number(row.ranks.get(category), 1)
        ));
    }
    cells
}

/// Weekly "Traditional Statistics" table for `week`.
pub fn render_leaderboard(rows: &[RankedTeamWeek], week: u32) -> String {
    let mut headers = vec!["Week", "Name", "Rem/Live/Comp", "Adjusted Rank"];
    headers.extend(Category::ALL.iter().map(|c| c.label()));

    let lines: Vec<Vec<String>> = week_rows(rows, week)
        .into_iter()
        .map(leaderboard_row)
        .collect();
    render_table(&headers, &lines)
}

/// Standings by rank, with each team's logo URL matched on team name.
pub fn render_standings(standings: &[Standing], logos: &[TeamLogo]) -> String {
    let mut sorted: Vec<&Standing> = standings.iter().collect();
    sorted.sort_by_key(|s| s.rank.unwrap_or(u32::MAX));

    let logo_of = |name: Option<&str>| {
        logos
            .iter()
            .find(|l| Some(l.team.as_str()) == name)
            .map_or_else(|| "-".to_string(), |l| l.url.clone())
    };

    let lines: Vec<Vec<String>> = sorted
        .into_iter()
        .map(|s| {
            vec![
                count(s.rank),
                s.name.clone().unwrap_or_default(),
                s.record(),
                number(s.percentage, 3),
                number(s.games_back, 1),
                logo_of(s.name.as_deref()),
            ]
        })
        .collect();
    render_table(&["Rank", "Name", "Record", "Pct", "GB", "Logo"], &lines)
}

pub fn render_matchups(matchups: &[MatchupResult]) -> String {
    let lines: Vec<Vec<String>> = matchups
        .iter()
        .map(|m| vec![m.label(), m.score(), m.lead.clone()])
        .collect();
    render_table(&["Matchup", "Score", "Lead"], &lines)
}

/// Adjusted ranks for `week` as a horizontal bar chart; the best team gets
/// the longest bar.
pub fn render_free_agency(rows: &[RankedTeamWeek], week: u32) -> String {
    let teams = week_rows(rows, week);
    let worst = teams.iter().map(|r| r.adjusted_rank).max().unwrap_or(1).max(1);

    let lines: Vec<Vec<String>> = teams
        .into_iter()
        .map(|r| {
            let len = (worst + 1 - r.adjusted_rank) as usize * BAR_WIDTH / worst as usize;
            vec![
                r.record.name.clone().unwrap_or_default(),
                r.adjusted_rank.to_string(),
                "#".repeat(len.max(1)),
            ]
        })
        .collect();
    render_table(&["Name", "Adjusted Rank", ""], &lines)
}

pub fn render_comparison(summaries: &[PlayerSummary]) -> String {
    let Some(first) = summaries.first() else {
        return String::new();
    };

    let mut headers = vec!["Player", "Games"];
    headers.extend(first.stats.iter().map(|(name, _)| display_column(name)));

    let lines: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            let mut cells = vec![s.player.clone(), s.games.to_string()];
            cells.extend(s.stats.iter().map(|(_, v)| v.to_string()));
            cells
        })
        .collect();
    render_table(&headers, &lines)
}

fn display_column(name: &str) -> &str {
    match name {
        "FG_PCT" => "FG%",
        "FG3_PCT" => "3PT FG%",
        "FT_PCT" => "FT%",
        other => other,
    }
}
