use crate::analyzers::rank::{Order, fractional_rank, min_rank};
use crate::analyzers::types::RankedTeamWeek;
use crate::stats::{Category, CategoryLine, TeamWeekRecord};

/// Ranks one week's records.
///
/// Each category is ranked over the teams that reported it, with fractional
/// ties; turnovers rank ascending and every other category descending. The
/// category ranks are summed into the aggregate rank, which is min-ranked
/// into the adjusted rank. Rows come back sorted by adjusted rank, keeping
/// input order among equals.
pub fn rank_week(records: Vec<TeamWeekRecord>) -> Vec<RankedTeamWeek> {
    let mut ranks = vec![CategoryLine::default(); records.len()];

    for category in Category::ALL {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.values.get(category)).collect();
        let order = if category.lower_is_better() {
            Order::Ascending
        } else {
            Order::Descending
        };

        for (line, rank) in ranks.iter_mut().zip(fractional_rank(&values, order)) {
            line.set(category, rank);
        }
    }

    let aggregates: Vec<f64> = ranks.iter().map(CategoryLine::sum).collect();
    let adjusted = min_rank(&aggregates);

    let mut rows: Vec<RankedTeamWeek> = records
        .into_iter()
        .zip(ranks)
        .zip(aggregates.into_iter().zip(adjusted))
        .map(|((record, ranks), (aggregate_rank, adjusted_rank))| RankedTeamWeek {
            record,
            ranks,
            aggregate_rank,
            adjusted_rank,
        })
        .collect();

    rows.sort_by_key(|r| r.adjusted_rank);
    rows
}

/// Concatenates per-week tables in the order given.
pub fn stack_weeks(weeks: Vec<Vec<RankedTeamWeek>>) -> Vec<RankedTeamWeek> {
    weeks.into_iter().flatten().collect()
}

/// The most recent week present in `rows`.
pub fn latest_week(rows: &[RankedTeamWeek]) -> Option<u32> {
    rows.iter().filter_map(|r| r.record.week).max()
}

/// Rows for `week`, sorted by adjusted rank.
pub fn week_rows(rows: &[RankedTeamWeek], week: u32) -> Vec<&RankedTeamWeek> {
    let mut out: Vec<_> = rows.iter().filter(|r| r.record.week == Some(week)).collect();
    out.sort_by_key(|r| r.adjusted_rank);
    out
}
