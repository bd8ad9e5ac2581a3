// src/coordinator/coordinator.rs

use crate::config::ScraperConfig;
use crate::coordinator::platform::{DownloadId, DownloadRequest, Platform};
use crate::domain::ListingRecord;
use crate::errors::ScrapeError;
use crate::messages::{Message, Response, Tab, TabId};
use crate::spreadsheets::ExportArtifact;
use std::sync::Arc;

/// Background side of a scrape: injects, invokes, exports, reports.
///
/// Holds no state between scrapes. Every failure ends either in a failed
/// [`Response`], a `SCRAPING_ERROR` event, or a notification.
pub struct Coordinator<P> {
    platform: Arc<P>,
    config: ScraperConfig,
}

impl<P: Platform> Coordinator<P> {
    pub fn new(platform: Arc<P>, config: ScraperConfig) -> Self {
        Self { platform, config }
    }

    pub fn platform(&self) -> &Arc<P> {
        &self.platform
    }

    /// Entry point for messages addressed to the coordinator.
    pub async fn handle_message(&self, message: Message) -> Response {
        tracing::debug!(kind = message.kind(), "Background script received message");

        match message {
            Message::StartScraping { tab_id } => self.start_scraping(tab_id).await,
            Message::ScrapingResults { data } => self.handle_results(&data).await,
            Message::ScrapingError { error } => self.handle_error(&error).await,
            other => {
                tracing::debug!(kind = other.kind(), "ignoring message");
                Response::ok()
            }
        }
    }

    /// Injects the content script into `tab`, asks it to scrape and handles
    /// the single reply.
    pub async fn start_scraping(&self, tab: TabId) -> Response {
        tracing::info!(%tab, "Starting scraping process");

        let reply = match self.invoke(tab, true).await {
            Ok(reply) => reply,
            Err(e) => return self.handle_error(&e.to_string()).await,
        };

        self.handle_reply(reply).await
    }

    /// Builds the export, downloads it, then reports completion.
    pub async fn handle_results(&self, records: &[ListingRecord]) -> Response {
        tracing::info!(count = records.len(), "Received scraping results");

        match self.export(records).await {
            Ok(download_id) => {
                tracing::info!(download_id, "Download started");
                self.emit(Message::ScrapingCompleted).await;
                Response::ok()
            }
            Err(e) => self.handle_error(&e.to_string()).await,
        }
    }

    /// Tells the user and the popup that something went wrong.
    pub async fn handle_error(&self, message: &str) -> Response {
        tracing::error!(error = %message, "Scraping error");
        self.platform.notify("Scraping Error", message);
        self.emit(Message::error(message)).await;
        Response::failed(message)
    }

    /// Toolbar icon path. Failures before the page replies only notify.
    pub async fn on_icon_clicked(&self, tab: &Tab) {
        if !self.config.is_target_site(&tab.url) {
            tracing::warn!(url = %tab.url, "icon clicked off the target site");
            self.platform.notify("Error", &ScrapeError::WrongSite.to_string());
            return;
        }

        match self.invoke(tab.id, false).await {
            Ok(reply) => {
                self.handle_reply(reply).await;
            }
            Err(e @ ScrapeError::Injection(_)) => {
                tracing::error!(error = %e, tab = %tab.id, "icon click injection failed");
                self.platform.notify(
                    "Error",
                    "Failed to inject content script. Please refresh the page and try again.",
                );
            }
            Err(e) => {
                tracing::error!(error = %e, tab = %tab.id, "icon click messaging failed");
                self.platform.notify(
                    "Error",
                    "Failed to communicate with the page. Please refresh and try again.",
                );
            }
        }
    }

    /// Inject, optionally announce, then send `SCRAPE_PAGE` and wait for the
    /// reply.
    async fn invoke(&self, tab: TabId, announce: bool) -> Result<Message, ScrapeError> {
        self.platform.inject(tab).await.map_err(|e| {
            tracing::error!(error = %e, %tab, "Error injecting content script");
            ScrapeError::Injection(e.message)
        })?;

        if announce {
            self.emit(Message::ScrapingStarted).await;
        }

        self.platform
            .send_to_tab(tab, Message::ScrapePage)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %tab, "Error sending message to content script");
                ScrapeError::Messaging(e.message)
            })
    }

    async fn handle_reply(&self, reply: Message) -> Response {
        match reply {
            Message::ScrapingResults { data } => self.handle_results(&data).await,
            Message::ScrapingError { error } => self.handle_error(&error).await,
            other => {
                let e = ScrapeError::Messaging(format!("unexpected reply {}", other.kind()));
                self.handle_error(&e.to_string()).await
            }
        }
    }

    async fn export(&self, records: &[ListingRecord]) -> Result<DownloadId, ScrapeError> {
        let artifact = ExportArtifact::build(
            records,
            self.config.export_format,
            &self.config.export_filename(),
        )?;
        tracing::debug!(
            filename = %artifact.filename,
            bytes = artifact.bytes.len(),
            "export generated"
        );

        let request = DownloadRequest {
            url: artifact.data_url(),
            filename: artifact.filename,
            save_as: self.config.save_as,
        };

        self.platform
            .download(request)
            .await
            .map_err(|e| ScrapeError::Download(e.message))
    }

    /// Popup may be closed; a missing listener is not an error.
    async fn emit(&self, message: Message) {
        let kind = message.kind();
        if let Err(e) = self.platform.broadcast(message).await {
            tracing::debug!(kind, error = %e, "no listener for event");
        }
    }
}
