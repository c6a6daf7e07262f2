//! Ranking primitives used by the weekly aggregation.

use std::cmp::Ordering;

/// Sort direction for a ranking: which end of the values gets rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Smallest value ranks first.
    Ascending,
    /// Largest value ranks first.
    Descending,
}

/// Ranks the present values of `values`, giving tied values the average of
/// the positions they occupy (`{10, 8, 8}` ascending → `{3, 1.5, 1.5}`).
///
/// Missing entries get a missing rank and do not count towards N.
pub fn fractional_rank(values: &[Option<f64>], order: Order) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| !x.is_nan()).map(|x| (i, x)))
        .collect();
    present.sort_by(|a, b| compare(a.1, b.1, order));

    let mut ranks = vec![None; values.len()];
    let mut start = 0;
    while start < present.len() {
        let mut end = start + 1;
        while end < present.len() && present[end].1 == present[start].1 {
            end += 1;
        }
        // positions start+1 ..= end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &(i, _) in &present[start..end] {
            ranks[i] = Some(rank);
        }
        start = end;
    }
    ranks
}

/// Ascending "min" ranking: tied values share the lowest position they
/// occupy, and the next distinct value resumes at its own position
/// (`{16, 17, 17, 20}` → `{1, 2, 2, 4}`).
pub fn min_rank(values: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| compare(values[a], values[b], Order::Ascending));

    let mut ranks = vec![0; values.len()];
    for (pos, &i) in order.iter().enumerate() {
        ranks[i] = if pos > 0 && values[order[pos - 1]] == values[i] {
            ranks[order[pos - 1]]
        } else {
            pos as u32 + 1
        };
    }
    ranks
}

fn compare(a: f64, b: f64, order: Order) -> Ordering {
    let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    match order {
        Order::Ascending => ord,
        Order::Descending => ord.reverse(),
    }
}
