// src/errors.rs
use thiserror::Error;

/// Failures that end a scrape, one per place the pipeline can break.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Timeout waiting for elements: {0}")]
    Timeout(String),

    #[error("No property listings found on the page")]
    NoListingsFound,

    #[error("Failed to inject content script: {0}")]
    Injection(String),

    #[error("Failed to communicate with the page: {0}")]
    Messaging(String),

    #[error("Failed to download file: {0}")]
    Download(String),

    #[error("Please navigate to a Furnished Finder search results page")]
    WrongSite,

    #[error("Failed to process results: {0}")]
    Export(String),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Failed to load page: {0}")]
    Page(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A single card could not be turned into a record. The card is dropped.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("invalid listing url '{href}': {message}")]
    InvalidUrl { href: String, message: String },
}

/// Error reported by one of the platform services (injection, messaging,
/// downloads). Carries the platform's own message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PlatformError {
    pub message: String,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
