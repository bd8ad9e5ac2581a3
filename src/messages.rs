// src/messages.rs

use crate::domain::ListingRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser tab identifier, as handed out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tab as the coordinator and popup see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
}

/// Every message exchanged between popup, coordinator and content script.
///
/// ```text
/// START_SCRAPING      popup       -> coordinator
/// SCRAPE_PAGE         coordinator -> content script
/// SCRAPING_STARTED    coordinator -> popup
/// SCRAPING_RESULTS    content     -> coordinator
/// SCRAPING_COMPLETED  coordinator -> popup
/// SCRAPING_ERROR      any         -> coordinator / popup
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    StartScraping {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    ScrapePage,
    ScrapingStarted,
    ScrapingResults {
        data: Vec<ListingRecord>,
    },
    ScrapingCompleted,
    ScrapingError {
        error: String,
    },
}

impl Message {
    pub fn error(error: impl Into<String>) -> Self {
        Message::ScrapingError {
            error: error.into(),
        }
    }

    /// Wire name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::StartScraping { .. } => "START_SCRAPING",
            Message::ScrapePage => "SCRAPE_PAGE",
            Message::ScrapingStarted => "SCRAPING_STARTED",
            Message::ScrapingResults { .. } => "SCRAPING_RESULTS",
            Message::ScrapingCompleted => "SCRAPING_COMPLETED",
            Message::ScrapingError { .. } => "SCRAPING_ERROR",
        }
    }
}

/// Reply to a message sent to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
