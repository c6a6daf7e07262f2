//! Weekly category ranking, matchup scoring and player comparison.
//!
//! This module turns parsed scoreboards into ranked season tables,
//! counts category wins per matchup, and summarizes player game logs.
//! [`analyzer::refresh`] runs the whole league pipeline and persists it.

pub mod aggregate;
pub mod analyzer;
pub mod comparison;
pub mod matchup;
pub mod rank;
pub mod types;
pub mod utility;
