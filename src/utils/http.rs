use std::future::Future;
use std::time::Duration;

use log::warn;
use reqwest::Client;

/// Source of subscription bodies.
///
/// `None` means the source produced nothing usable this run: network
/// error, non-2xx status or timeout. Implementations never fail past this
/// boundary.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Option<String>>;
}

/// Fetcher backed by a shared `reqwest` client with a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match web_get_async(&self.client, url).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("failed to fetch {}: {}", url, e);
                None
            }
        }
    }
}

/// Makes a single GET request to the specified URL
///
/// # Returns
/// * `Ok(String)` - The trimmed response body
/// * `Err(String)` - Error message if the request failed or the status was not 2xx
pub async fn web_get_async(client: &Client, url: &str) -> Result<String, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .text()
        .await
        .map(|body| body.trim().to_string())
        .map_err(|e| format!("Failed to read response body: {}", e))
}
