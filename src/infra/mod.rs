//! Concrete clients for the upstream providers.

pub mod nba;
pub mod yahoo;
