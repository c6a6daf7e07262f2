//! Statistic categories tracked by the league and the flat per-team,
//! per-week record built from a scoreboard response.

use serde_json::Value;

/// League stat id of the field-goals made/attempted text column.
pub const FGM_A_STAT_ID: &str = "9004003";
/// League stat id of the free-throws made/attempted text column.
pub const FTM_A_STAT_ID: &str = "9007006";

/// League stat ids and the column label each one is stored under.
/// Ids missing from this table are not carried into the flat record.
pub static STAT_LABELS: &[(&str, &str)] = &[
    (FGM_A_STAT_ID, "FGM/A"),
    ("5", "FG%"),
    (FTM_A_STAT_ID, "FTM/A"),
    ("8", "FT%"),
    ("10", "3PTM"),
    ("12", "PTS"),
    ("15", "REB"),
    ("16", "AST"),
    ("17", "STL"),
    ("18", "BLK"),
    ("19", "TO"),
];

/// Returns the column label for a league stat id, if it is tracked.
pub fn stat_label(stat_id: &str) -> Option<&'static str> {
    STAT_LABELS
        .iter()
        .find(|(id, _)| *id == stat_id)
        .map(|(_, label)| *label)
}

/// The nine ranked scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FgPct,
    FtPct,
    ThreePtm,
    Pts,
    Reb,
    Ast,
    Stl,
    Blk,
    To,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::FgPct,
        Category::FtPct,
        Category::ThreePtm,
        Category::Pts,
        Category::Reb,
        Category::Ast,
        Category::Stl,
        Category::Blk,
        Category::To,
    ];

    pub fn stat_id(self) -> &'static str {
        match self {
            Category::FgPct => "5",
            Category::FtPct => "8",
            Category::ThreePtm => "10",
            Category::Pts => "12",
            Category::Reb => "15",
            Category::Ast => "16",
            Category::Stl => "17",
            Category::Blk => "18",
            Category::To => "19",
        }
    }

    pub fn label(self) -> &'static str {
        stat_label(self.stat_id()).unwrap_or("?")
    }

    pub fn from_stat_id(stat_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.stat_id() == stat_id)
    }

    /// Turnovers are the only category where a smaller total wins.
    pub fn lower_is_better(self) -> bool {
        matches!(self, Category::To)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One optional value per [`Category`]. Used both for raw totals and for ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryLine([Option<f64>; 9]);

impl CategoryLine {
    pub fn get(&self, category: Category) -> Option<f64> {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: Category, value: Option<f64>) {
        self.0[category.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Option<f64>)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of the present values; missing entries contribute nothing.
    pub fn sum(&self) -> f64 {
        self.0.iter().flatten().sum()
    }
}

/// A team's line for one week, flattened out of a scoreboard response.
///
/// Every field is optional: a key the API left out stays `None` rather than
/// failing the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamWeekRecord {
    pub week: Option<u32>,
    pub team_key: Option<String>,
    pub team_id: Option<u32>,
    pub name: Option<String>,
    pub remaining_games: Option<u32>,
    pub live_games: Option<u32>,
    pub completed_games: Option<u32>,
    pub fgm_a: Option<String>,
    pub ftm_a: Option<String>,
    pub values: CategoryLine,
}

/// Coerces a JSON scalar into a finite number.
///
/// Numbers pass through; strings are parsed after trimming (`".471"`,
/// `"12"`). Anything else, including placeholders such as `"-"`, is `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerces a JSON scalar into a non-negative whole count.
pub fn coerce_count(value: &Value) -> Option<u32> {
    let n = coerce_number(value)?;
    if n < 0.0 || n.fract() != 0.0 || n > u32::MAX as f64 {
        return None;
    }
    Some(n as u32)
}

/// Renders a JSON scalar as text, for the made/attempted columns.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stat_labels_cover_all_categories() {
        for category in Category::ALL {
            assert_ne!(category.label(), "?", "{category:?} has no label");
        }
        assert_eq!(Category::To.label(), "TO");
        assert_eq!(Category::ThreePtm.label(), "3PTM");
    }

    #[test]
    fn test_untracked_stat_id_has_no_label() {
        assert_eq!(stat_label("99"), None);
        assert_eq!(Category::from_stat_id("99"), None);
        assert_eq!(Category::from_stat_id(FGM_A_STAT_ID), None);
        assert_eq!(Category::from_stat_id("19"), Some(Category::To));
    }

    #[test]
    fn test_only_turnovers_prefer_lower() {
        let lower: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.lower_is_better())
            .collect();
        assert_eq!(lower, vec![Category::To]);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(".471")), Some(0.471));
        assert_eq!(coerce_number(&json!(" 12 ")), Some(12.0));
        assert_eq!(coerce_number(&json!(7)), Some(7.0));
        assert_eq!(coerce_number(&json!("-")), None);
        assert_eq!(coerce_number(&json!("")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(&json!("3")), Some(3));
        assert_eq!(coerce_count(&json!(0)), Some(0));
        assert_eq!(coerce_count(&json!("2.5")), None);
        assert_eq!(coerce_count(&json!("-1")), None);
    }

    #[test]
    fn test_category_line_sum_skips_missing() {
        let mut line = CategoryLine::default();
        line.set(Category::Pts, Some(1.5));
        line.set(Category::To, Some(3.0));
        assert_eq!(line.sum(), 4.5);
        assert_eq!(CategoryLine::default().sum(), 0.0);
    }
}
