mod dom;
mod engine;
mod listing;
mod page;
mod selectors;
mod strategy;
mod wait;

pub use engine::ExtractionEngine;
pub use listing::{clean_price, scrape_listing};
pub use page::{ContentScript, PageContext};
pub use selectors::ListingSelectors;
pub use strategy::{
    extract_details, split_bed_bath, ExtractionStrategy, ListingDetails, DEFAULT_STRATEGIES,
};
pub use wait::{wait_for_element, FrameClock, TokioFrameClock};
