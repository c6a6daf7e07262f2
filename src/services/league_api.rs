//! Trait for reading a fantasy league from its provider.

use anyhow::Result;
use serde_json::Value;

/// Read-only access to one fantasy league.
///
/// Implementations return the provider's raw JSON; typed extraction lives in
/// [`crate::parser::yahoo`]. Each call is a single request with no retry or
/// caching, and failures are returned to the caller as-is.
#[async_trait::async_trait]
pub trait LeagueApi: Send + Sync {
    /// League key the handle is bound to, e.g. `454.l.74601`.
    fn league_key(&self) -> &str;

    /// League metadata, including `current_week`.
    async fn metadata(&self) -> Result<Value>;

    /// Scoreboard for `week`. The week is not range-checked here; the
    /// provider rejects weeks it does not know.
    async fn scoreboard(&self, week: u32) -> Result<Value>;

    /// Season standings.
    async fn standings(&self) -> Result<Value>;

    /// Details for a single team, including its logos.
    async fn team(&self, team_key: &str) -> Result<Value>;
}
