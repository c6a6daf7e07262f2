mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Issues a single GET and returns the body as text.
///
/// A non-success status is an error carrying the status and body.
pub async fn fetch_text<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<String> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    let body = resp.text().await?;
    debug!(url, %status, bytes = body.len(), "Response received");

    if !status.is_success() {
        return Err(anyhow!("{url} returned status {status}: {body}"));
    }
    Ok(body)
}

/// Issues a single GET and deserializes the JSON body.
pub async fn fetch_json<T, C>(client: &C, url: &str) -> Result<T>
where
    T: DeserializeOwned,
    C: HttpClient + ?Sized,
{
    let body = fetch_text(client, url).await?;
    serde_json::from_str(&body).map_err(|e| anyhow!("Failed to parse response from {url}: {e}"))
}
