// src/host/fetch.rs

use crate::errors::ScrapeError;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Downloads a results page. Only server-rendered markup is visible this way.
pub async fn fetch_page(url: &Url) -> Result<String, ScrapeError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| ScrapeError::Page(e.to_string()))?;

    tracing::info!(%url, "fetching page");
    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| ScrapeError::Page(e.to_string()))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| ScrapeError::Page(e.to_string()))?;

    if !status.is_success() {
        return Err(ScrapeError::Page(format!("HTTP {} for {}", status, url)));
    }

    Ok(text)
}

/// Reads a saved results page from disk.
pub async fn read_page(path: &Path) -> Result<String, ScrapeError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ScrapeError::Page(format!("{}: {}", path.display(), e)))
}
