// src/extraction/engine.rs

use crate::config::ScraperConfig;
use crate::domain::ListingRecord;
use crate::errors::ScrapeError;
use crate::extraction::listing::scrape_listing;
use crate::extraction::page::PageContext;
use crate::extraction::selectors::{self, ListingSelectors};
use crate::extraction::strategy::{ExtractionStrategy, DEFAULT_STRATEGIES};
use crate::extraction::wait::{wait_for_element, FrameClock, TokioFrameClock};
use scraper::Html;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Finds the listings container on a page and turns every card in it into a
/// [`ListingRecord`].
pub struct ExtractionEngine {
    container_selectors: Vec<String>,
    wait_timeout: Duration,
    selectors: ListingSelectors,
    strategies: Vec<ExtractionStrategy>,
    clock: Arc<dyn FrameClock>,
}

impl fmt::Debug for ExtractionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionEngine")
            .field("container_selectors", &self.container_selectors)
            .field("wait_timeout", &self.wait_timeout)
            .field("strategies", &self.strategies)
            .finish_non_exhaustive()
    }
}

impl ExtractionEngine {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        // Fail early on a bad container selector rather than at first scrape
        selectors::parse_all(&config.container_selectors)?;

        Ok(Self {
            container_selectors: config.container_selectors.clone(),
            wait_timeout: config.wait_timeout,
            selectors: ListingSelectors::compile()?,
            strategies: DEFAULT_STRATEGIES.to_vec(),
            clock: Arc::new(TokioFrameClock::new(config.frame_interval)),
        })
    }

    pub fn with_strategies(mut self, strategies: Vec<ExtractionStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn FrameClock>) -> Self {
        self.clock = clock;
        self
    }

    /// Waits for the container, then extracts every card in document order.
    /// Cards that fail are logged and left out.
    pub async fn scrape_listings(
        &self,
        page: &PageContext,
    ) -> Result<Vec<ListingRecord>, ScrapeError> {
        tracing::info!(url = ?page.url().map(Url::as_str), "Starting to scrape listings...");

        let container = wait_for_element(
            page,
            &self.container_selectors,
            self.wait_timeout,
            self.clock.as_ref(),
        )
        .await?;

        self.extract_from_markup(&page.markup(), &container, page.url())
    }

    /// Synchronous half of a scrape, over one snapshot of the document.
    pub fn extract_from_markup(
        &self,
        markup: &str,
        container_selector: &str,
        base: Option<&Url>,
    ) -> Result<Vec<ListingRecord>, ScrapeError> {
        let document = Html::parse_document(markup);
        let container_selector = selectors::parse(container_selector)?;

        let Some(container) = document.select(&container_selector).next() else {
            // The wait saw it; a re-render removed it since
            return Err(ScrapeError::NoListingsFound);
        };

        let cards: Vec<_> = container.select(&self.selectors.cards).collect();
        tracing::info!(count = cards.len(), "Found listings");
        if cards.is_empty() {
            return Err(ScrapeError::NoListingsFound);
        }

        let records: Vec<ListingRecord> = cards
            .into_iter()
            .enumerate()
            .filter_map(|(index, card)| {
                match scrape_listing(card, base, &self.selectors, &self.strategies) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "Error scraping property listing");
                        None
                    }
                }
            })
            .collect();

        tracing::info!(count = records.len(), "Successfully scraped listings");
        Ok(records)
    }
}
