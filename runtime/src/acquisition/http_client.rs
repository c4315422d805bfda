//! Async HTTP client wrapping reqwest.
//!
//! Not a browser — just HTTP requests. One attempt per call: no retries and
//! no backoff, redirects are followed up to a small limit.

use anyhow::Result;
use std::time::Duration;

/// Desktop Chrome user-agent shared by the HTTP client and the browser page.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/131.0.0.0 Safari/537.36";

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for the listing fetcher.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with standard Chrome user-agent.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Perform a single GET request.
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        let r = self
            .client
            .get(url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await?;

        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        let body = r.text().await?;

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }
}
