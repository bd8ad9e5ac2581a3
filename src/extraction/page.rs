// src/extraction/page.rs

use crate::extraction::engine::ExtractionEngine;
use crate::messages::Message;
use std::sync::{Arc, OnceLock, RwLock};
use url::Url;

/// One loaded document in a tab.
///
/// The markup can be replaced while the page is still rendering. The content
/// script is installed at most once per document; the marker lives with the
/// document and is never cleared, so reloading means building a new
/// `PageContext`.
#[derive(Debug)]
pub struct PageContext {
    url: Option<Url>,
    markup: RwLock<String>,
    content_script: OnceLock<ContentScript>,
}

impl PageContext {
    pub fn new(url: Option<Url>, markup: impl Into<String>) -> Self {
        Self {
            url,
            markup: RwLock::new(markup.into()),
            content_script: OnceLock::new(),
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Snapshot of the current document source.
    pub fn markup(&self) -> String {
        match self.markup.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_markup(&self, markup: impl Into<String>) {
        let markup = markup.into();
        match self.markup.write() {
            Ok(mut guard) => *guard = markup,
            Err(poisoned) => *poisoned.into_inner() = markup,
        }
    }

    /// Installs the content script. Returns `false` (and changes nothing) if
    /// one is already installed on this document.
    pub fn inject(&self, engine: Arc<ExtractionEngine>) -> bool {
        let installed = self
            .content_script
            .set(ContentScript { engine })
            .is_ok();

        if installed {
            tracing::debug!(url = ?self.url.as_ref().map(Url::as_str), "content script installed");
        } else {
            tracing::info!("Content script already initialized");
        }
        installed
    }

    pub fn is_initialized(&self) -> bool {
        self.content_script.get().is_some()
    }

    /// Delivers a message to the page's listener. `None` means nobody answered:
    /// no content script, or a message it does not handle.
    pub async fn dispatch(&self, message: Message) -> Option<Message> {
        let script = self.content_script.get()?;
        script.handle(self, message).await
    }
}

/// Listener registered in the page by injection.
#[derive(Debug)]
pub struct ContentScript {
    engine: Arc<ExtractionEngine>,
}

impl ContentScript {
    /// Replies exactly once to `SCRAPE_PAGE`, with either the results or the
    /// failure.
    pub async fn handle(&self, page: &PageContext, message: Message) -> Option<Message> {
        match message {
            Message::ScrapePage => {
                tracing::info!("Received SCRAPE_PAGE message");
                let reply = match self.engine.scrape_listings(page).await {
                    Ok(data) => {
                        tracing::info!(count = data.len(), "Scraping completed successfully");
                        Message::ScrapingResults { data }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Scraping failed");
                        Message::error(format!("Failed to scrape listings: {e}"))
                    }
                };
                Some(reply)
            }
            other => {
                tracing::debug!(kind = other.kind(), "content script ignoring message");
                None
            }
        }
    }
}
