//! HTTP collaborator for embed resolvers.
//!
//! Resolvers talk to oEmbed endpoints through the [`HttpFetch`] trait so
//! tests can inject canned responses; the real implementation is a blocking
//! reqwest client (compilations already run on a blocking worker).

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use url::Url;

/// Contract for fetching a JSON document from a URL.
pub trait HttpFetch: Send + Sync {
    fn fetch_json(&self, url: &Url) -> Result<serde_json::Value>;
}

/// Blocking reqwest-based fetcher.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("mdforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl HttpFetch for HttpClient {
    fn fetch_json(&self, url: &Url) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{url} responded with status {status}");
        }

        response
            .json()
            .with_context(|| format!("{url} returned invalid JSON"))
    }
}
