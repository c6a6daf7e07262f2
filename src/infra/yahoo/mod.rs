//! Yahoo Fantasy Sports: OAuth2 token handling and the league client.
//!
//! [`Keypair`] holds the stored OAuth credentials and refreshes them against
//! the token endpoint. [`YahooLeague`] is the authenticated league handle
//! implementing [`LeagueApi`](crate::services::LeagueApi).

mod client;
mod oauth;

pub use client::YahooLeague;
pub use oauth::{Keypair, authenticate};
