// src/tests/utils.rs

use crate::coordinator::{
    DownloadId, DownloadRequest, Downloader, EventBus, Notifier, ScriptInjector, TabMessenger,
};
use crate::domain::ListingRecord;
use crate::errors::PlatformError;
use crate::messages::{Message, TabId};
use async_trait::async_trait;
use std::sync::Mutex;

pub const PAGE_URL: &str = "https://www.furnishedfinder.com/housing/Austin/Texas";

/// A flat-layout card with every field present.
pub fn flat_card(id: &str, price: &str, address: &str, details: &str) -> String {
    format!(
        r#"<a data-testid="native-link" href="/property/{id}">
             <div data-testid="property-card-{id}">
               <span data-testid="price">{price}</span>
               <span data-testid="address">{address}</span>
               <p class="text-grey-dark">{details}</p>
             </div>
           </a>"#
    )
}

/// Wraps cards in the search results container.
pub fn results_page(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Austin rentals</title></head><body>
             <header><a data-testid="native-link" href="/">home</a></header>
             <div id="serp_default_view">{}</div>
           </body></html>"#,
        cards.join("\n")
    )
}

pub fn three_card_page() -> String {
    results_page(&[
        flat_card(
            "101",
            "$1,950/mo",
            "100 Congress Ave, Austin, TX",
            "Apartment • 2 beds • 1 bath • 800 sqft",
        ),
        flat_card(
            "202",
            "$2,400/mo",
            "200 Lamar Blvd, Austin, TX",
            "House • 3 beds • 2 baths • 1450 sqft",
        ),
        flat_card(
            "303",
            "$1,100.50/mo",
            "300 Guadalupe St, Austin, TX",
            "Private Room • 1 bed • 1 bath • 300 sqft",
        ),
    ])
}

pub fn record(title: &str, price: &str) -> ListingRecord {
    ListingRecord {
        property_title: Some(title.to_string()),
        property_url: Some(format!("https://www.furnishedfinder.com/property/{title}")),
        price: Some(price.to_string()),
        beds: Some("2".to_string()),
        baths: Some("1".to_string()),
        address: Some("1 Main St, Austin, TX".to_string()),
        property_type: Some("Apartment".to_string()),
        sqft: Some("750".to_string()),
    }
}

/// Quote-aware CSV reader for checking exports: rows split on `\n`, fields
/// on `,`, `""` inside quotes is a literal quote.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            c => field.push(c),
        }
    }
    row.push(field);
    rows.push(row);
    rows
}

/// Scriptable platform that records every call.
#[derive(Default)]
pub struct MockPlatform {
    pub inject_error: Option<String>,
    pub tab_reply: Option<Result<Message, String>>,
    pub download_error: Option<String>,
    pub injections: Mutex<Vec<TabId>>,
    pub sent: Mutex<Vec<(TabId, Message)>>,
    pub events: Mutex<Vec<Message>>,
    pub downloads: Mutex<Vec<DownloadRequest>>,
    pub notifications: Mutex<Vec<(String, String)>>,
}

impl MockPlatform {
    pub fn replying(reply: Message) -> Self {
        Self {
            tab_reply: Some(Ok(reply)),
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<Message> {
        self.events.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<DownloadRequest> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<(String, String)> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn error_events(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|m| match m {
                Message::ScrapingError { error } => Some(error),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ScriptInjector for MockPlatform {
    async fn inject(&self, tab: TabId) -> Result<(), PlatformError> {
        self.injections.lock().unwrap().push(tab);
        match &self.inject_error {
            Some(message) => Err(PlatformError::new(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TabMessenger for MockPlatform {
    async fn send_to_tab(&self, tab: TabId, message: Message) -> Result<Message, PlatformError> {
        self.sent.lock().unwrap().push((tab, message));
        match &self.tab_reply {
            Some(Ok(reply)) => Ok(reply.clone()),
            Some(Err(message)) => Err(PlatformError::new(message.clone())),
            None => Err(PlatformError::new(
                "Could not establish connection. Receiving end does not exist.",
            )),
        }
    }
}

#[async_trait]
impl EventBus for MockPlatform {
    async fn broadcast(&self, message: Message) -> Result<(), PlatformError> {
        self.events.lock().unwrap().push(message);
        Ok(())
    }
}

#[async_trait]
impl Downloader for MockPlatform {
    async fn download(&self, request: DownloadRequest) -> Result<DownloadId, PlatformError> {
        self.downloads.lock().unwrap().push(request);
        match &self.download_error {
            Some(message) => Err(PlatformError::new(message.clone())),
            None => Ok(1),
        }
    }
}

impl Notifier for MockPlatform {
    fn notify(&self, title: &str, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}
