// src/popup.rs

use crate::config::ScraperConfig;
use crate::messages::{Message, Response, Tab};

pub const WRONG_SITE_MESSAGE: &str =
    "Please navigate to a Furnished Finder search results page first.";
pub const START_FAILED_MESSAGE: &str = "Failed to start scraping. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Idle,
    Busy,
    Error(String),
}

/// What the host should do with the popup after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Stay,
    Close,
}

/// Trigger UI. Holds only its visible state.
#[derive(Debug, Clone)]
pub struct Popup {
    state: PopupState,
    config: ScraperConfig,
}

impl Popup {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            state: PopupState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    /// Scrape button. Returns the request to send to the coordinator, if any.
    pub fn click(&mut self, tab: &Tab) -> Option<Message> {
        if self.state == PopupState::Busy {
            tracing::debug!("scrape already in progress");
            return None;
        }

        if !self.config.is_target_site(&tab.url) {
            self.state = PopupState::Error(WRONG_SITE_MESSAGE.to_string());
            return None;
        }

        tracing::debug!(tab = %tab.id, "Sending START_SCRAPING message to background script");
        self.state = PopupState::Busy;
        Some(Message::StartScraping { tab_id: tab.id })
    }

    /// Reply to `START_SCRAPING`.
    pub fn on_response(&mut self, response: &Response) {
        if !response.success {
            let message = response
                .error
                .clone()
                .unwrap_or_else(|| START_FAILED_MESSAGE.to_string());
            self.state = PopupState::Error(message);
        }
    }

    pub fn on_event(&mut self, message: &Message) -> PopupAction {
        match message {
            Message::ScrapingStarted => {
                self.state = PopupState::Busy;
                PopupAction::Stay
            }
            Message::ScrapingCompleted => {
                self.state = PopupState::Idle;
                PopupAction::Close
            }
            Message::ScrapingError { error } => {
                self.state = PopupState::Error(error.clone());
                PopupAction::Stay
            }
            _ => PopupAction::Stay,
        }
    }
}
