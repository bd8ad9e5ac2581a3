// src/extraction/selectors.rs

use crate::errors::ScrapeError;
use scraper::Selector;

/// Each card is a div wrapped directly in the search result anchor.
pub const LISTING_CARDS: &str =
    r#"a[data-testid="native-link"] > div[data-testid^="property-card-"]"#;
pub const LISTING_ANCHOR: &str = r#"a[data-testid="native-link"]"#;
pub const CARD_ID_PREFIX: &str = "property-card-";

pub const PRICE: &[&str] = &[r#"[data-testid="price"]"#, ".text-black"];
pub const ADDRESS: &[&str] = &[r#"[data-testid="address"]"#, ".text-grey-dark"];
pub const DETAILS: &str = ".text-grey-dark";
pub const TOOLTIP: &[&str] = &[r#"[data-testid="property-tooltip"]"#, r#"[role="tooltip"]"#];
pub const CATEGORY: &str = r#"[data-testid="property-type"]"#;

pub fn parse(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

pub fn parse_all<S: AsRef<str>>(selectors: &[S]) -> Result<Vec<Selector>, ScrapeError> {
    selectors.iter().map(|s| parse(s.as_ref())).collect()
}

/// All selectors a card is read with, compiled once per engine.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub cards: Selector,
    pub anchor: Selector,
    pub price: Vec<Selector>,
    pub address: Vec<Selector>,
    pub details: Selector,
    pub tooltip: Vec<Selector>,
    pub category: Selector,
}

impl ListingSelectors {
    pub fn compile() -> Result<Self, ScrapeError> {
        Ok(Self {
            cards: parse(LISTING_CARDS)?,
            anchor: parse(LISTING_ANCHOR)?,
            price: parse_all(PRICE)?,
            address: parse_all(ADDRESS)?,
            details: parse(DETAILS)?,
            tooltip: parse_all(TOOLTIP)?,
            category: parse(CATEGORY)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_selectors_compile() {
        assert!(ListingSelectors::compile().is_ok());
    }

    #[test]
    fn bad_selector_reports_its_text() {
        match parse("div[") {
            Err(ScrapeError::Selector { selector, .. }) => assert_eq!(selector, "div["),
            other => panic!("expected selector error, got {other:?}"),
        }
    }
}
