//! Scrapes rental listings from a Furnished Finder search results page and
//! exports them as a spreadsheet download.
//!
//! Three cooperating parts, mirroring the browser extension layout:
//!
//! ```text
//! Popup --START_SCRAPING--> Coordinator --SCRAPE_PAGE--> content script (ExtractionEngine)
//!   ^                           |   ^                               |
//!   |                           |   +------- SCRAPING_RESULTS ------+
//!   +--- STARTED/COMPLETED/ERROR+--> export + download
//! ```
//!
//! Browser services are traits in [`coordinator`]; [`host::LocalHost`]
//! implements them in-process.

pub mod config;
pub mod coordinator;
pub mod domain;
pub mod errors;
pub mod extraction;
pub mod host;
pub mod messages;
pub mod popup;
pub mod spreadsheets;

#[cfg(test)]
mod tests;

pub use config::{ExportFormat, ScraperConfig};
pub use coordinator::{Coordinator, Platform};
pub use domain::ListingRecord;
pub use errors::{ListingError, PlatformError, ScrapeError};
pub use extraction::{ExtractionEngine, PageContext};
pub use messages::{Message, Response, Tab, TabId};
pub use popup::{Popup, PopupAction, PopupState};
