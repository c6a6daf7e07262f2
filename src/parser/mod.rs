//! Response parsers for the two upstream APIs.

pub mod nba;
pub mod yahoo;

pub use yahoo::{Matchup, StatWinner};
