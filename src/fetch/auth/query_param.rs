use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends a fixed query parameter to every
/// request, e.g. `format=json` for the fantasy API.
pub struct QueryParam<C> {
    pub inner: C,
    pub name: String,
    pub value: String,
}

impl<C> QueryParam<C> {
    pub fn new(inner: C, name: &str, value: &str) -> Self {
        Self {
            inner,
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for QueryParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.name, &self.value);
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Option<String>>);

    #[async_trait]
    impl HttpClient for Recorder {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            *self.0.lock().unwrap() = Some(req.url().to_string());
            // any request against an unroutable URL fails without network
            reqwest::Client::new()
                .get("http://[::1]:0/")
                .send()
                .await
        }
    }

    #[tokio::test]
    async fn test_query_param_is_appended() {
        let client = QueryParam::new(Recorder(Mutex::new(None)), "format", "json");
        let req = reqwest::Request::new(
            reqwest::Method::GET,
            "https://example.invalid/league/1;week=2".parse().unwrap(),
        );
        let _ = client.execute(req).await;
        let seen = client.inner.0.lock().unwrap().clone().unwrap();
        assert_eq!(seen, "https://example.invalid/league/1;week=2?format=json");
    }
}
