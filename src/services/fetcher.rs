use std::time::Duration;

use async_trait::async_trait;

/// Outcome of fetching one page. Any non-success status or transport error
/// collapses into `Failed`; callers decide whether that ends the run.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Page(String),
    Failed(String),
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> FetchOutcome;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .read_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client.");

        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> FetchOutcome {
        match self.client.get(url).send().await {
            Ok(res) => {
                let status = res.status();
                if !status.is_success() {
                    log::error!("Got status {} from {}", status, url);
                    return FetchOutcome::Failed(format!("status {}", status));
                }
                match res.text().await {
                    Ok(html) => FetchOutcome::Page(html),
                    Err(e) => {
                        log::error!("Failed to read body from {}. Error: {:?}", url, e);
                        FetchOutcome::Failed(format!("body read error: {}", e))
                    }
                }
            }
            Err(e) => {
                log::error!("No response from {}. Error: {:?}", url, e);
                FetchOutcome::Failed(format!("transport error: {}", e))
            }
        }
    }
}

/// In-memory fetcher over canned pages, counting hits per URL so tests can
/// assert the one-fetch-per-key cache invariant.
#[cfg(test)]
pub struct MockFetcher {
    pages: std::collections::HashMap<String, String>,
    hits: std::sync::Mutex<std::collections::HashMap<String, u32>>,
}

#[cfg(test)]
impl MockFetcher {
    pub fn new() -> Self {
        Self {
            pages: std::collections::HashMap::new(),
            hits: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn hits(&self, url: &str) -> u32 {
        *self.hits.lock().unwrap().get(url).unwrap_or(&0)
    }
}

#[cfg(test)]
#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_page(&self, url: &str) -> FetchOutcome {
        *self
            .hits
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        match self.pages.get(url) {
            Some(html) => FetchOutcome::Page(html.clone()),
            None => FetchOutcome::Failed("status 404 Not Found".to_string()),
        }
    }
}
