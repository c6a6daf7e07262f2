pub mod league_api;
pub mod player_api;

pub use league_api::LeagueApi;
pub use player_api::PlayerStatsApi;
