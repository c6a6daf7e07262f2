use tracing::warn;

use crate::analyzers::types::MatchupResult;
use crate::parser::Matchup;

/// Lead value for matchups where both sides won the same number of categories.
pub const TIE: &str = "Tie";

/// Counts categories won per team key.
///
/// Both sides of the matchup appear, in scoreboard order, even with zero
/// wins. Entries without a winner (tied categories) are not counted.
pub fn count_stat_winners(matchup: &Matchup) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = matchup
        .teams
        .iter()
        .filter_map(|t| t.team_key.clone())
        .map(|key| (key, 0))
        .collect();

    for winner in matchup.stat_winners.iter().filter_map(|w| w.winner_team_key.as_deref()) {
        match counts.iter_mut().find(|(key, _)| key == winner) {
            Some((_, n)) => *n += 1,
            None => counts.push((winner.to_string(), 1)),
        }
    }
    counts
}

/// Decides a matchup from its category-win counts.
///
/// The side with more wins is listed first and leads; equal counts keep
/// scoreboard order and produce [`TIE`]. Returns `None` when the matchup
/// does not have two sides.
pub fn matchup_result(matchup: &Matchup) -> Option<MatchupResult> {
    let counts = count_stat_winners(matchup);
    let [first, second] = counts.as_slice() else {
        warn!(matchup_id = %matchup.id, sides = counts.len(), "Skipping matchup without two sides");
        return None;
    };

    let (a, b) = if first.1 >= second.1 {
        (first, second)
    } else {
        (second, first)
    };

    let name_of = |key: &str| {
        matchup
            .teams
            .iter()
            .find(|t| t.team_key.as_deref() == Some(key))
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| key.to_string())
    };

    let lead = if a.1 > b.1 {
        name_of(&a.0)
    } else {
        TIE.to_string()
    };

    Some(MatchupResult {
        matchup_id: matchup.id.clone(),
        team_a_key: a.0.clone(),
        team_a: name_of(&a.0),
        team_a_wins: a.1,
        team_b_key: b.0.clone(),
        team_b: name_of(&b.0),
        team_b_wins: b.1,
        lead,
    })
}

pub fn matchup_results(matchups: &[Matchup]) -> Vec<MatchupResult> {
    matchups.iter().filter_map(matchup_result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::StatWinner;
    use crate::stats::TeamWeekRecord;

    fn team(key: &str, name: &str) -> TeamWeekRecord {
        TeamWeekRecord {
            team_key: Some(key.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn matchup(a_wins: usize, b_wins: usize, ties: usize) -> Matchup {
        let mut stat_winners = Vec::new();
        for _ in 0..a_wins {
            stat_winners.push(StatWinner {
                stat_id: Some("5".into()),
                winner_team_key: Some("t.1".into()),
            });
        }
        for _ in 0..b_wins {
            stat_winners.push(StatWinner {
                stat_id: Some("12".into()),
                winner_team_key: Some("t.2".into()),
            });
        }
        for _ in 0..ties {
            stat_winners.push(StatWinner {
                stat_id: Some("19".into()),
                winner_team_key: None,
            });
        }
        Matchup {
            id: "0".into(),
            teams: vec![team("t.1", "Alpha"), team("t.2", "Beta")],
            stat_winners,
        }
    }

    #[test]
    fn test_clear_leader() {
        let result = matchup_result(&matchup(6, 3, 0)).unwrap();
        assert_eq!(result.lead, "Alpha");
        assert_eq!(result.label(), "Alpha vs. Beta");
        assert_eq!(result.score(), "6 - 3");
    }

    #[test]
    fn test_leader_listed_first() {
        let result = matchup_result(&matchup(2, 7, 0)).unwrap();
        assert_eq!(result.lead, "Beta");
        assert_eq!(result.team_a_key, "t.2");
        assert_eq!(result.score(), "7 - 2");
    }

    #[test]
    fn test_equal_counts_tie() {
        let result = matchup_result(&matchup(5, 5, 0)).unwrap();
        assert_eq!(result.lead, TIE);
        assert_eq!(result.team_a, "Alpha");
    }

    #[test]
    fn test_tied_categories_not_counted() {
        let counts = count_stat_winners(&matchup(4, 4, 1));
        assert_eq!(counts, vec![("t.1".to_string(), 4), ("t.2".to_string(), 4)]);
    }

    #[test]
    fn test_side_without_wins_still_present() {
        let result = matchup_result(&matchup(0, 9, 0)).unwrap();
        assert_eq!(result.lead, "Beta");
        assert_eq!(result.team_b_wins, 0);
        assert_eq!(result.team_b, "Alpha");
    }

    #[test]
    fn test_single_sided_matchup_skipped() {
        let lonely = Matchup {
            id: "3".into(),
            teams: vec![team("t.1", "Alpha")],
            stat_winners: Vec::new(),
        };
        assert!(matchup_result(&lonely).is_none());
        assert!(matchup_results(&[lonely]).is_empty());
    }
}
