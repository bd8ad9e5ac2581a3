// src/extraction/listing.rs

use crate::domain::{non_empty, ListingRecord};
use crate::errors::ListingError;
use crate::extraction::dom::{closest, first_text};
use crate::extraction::selectors::{ListingSelectors, CARD_ID_PREFIX};
use crate::extraction::strategy::{extract_details, ExtractionStrategy};
use scraper::ElementRef;
use url::Url;

/// Reads one card into a record. Missing pieces become `None`; only a link
/// that cannot be made absolute fails the card.
pub fn scrape_listing(
    card: ElementRef<'_>,
    base: Option<&Url>,
    selectors: &ListingSelectors,
    strategies: &[ExtractionStrategy],
) -> Result<ListingRecord, ListingError> {
    let property_title = card
        .value()
        .attr("data-testid")
        .map(|id| id.strip_prefix(CARD_ID_PREFIX).unwrap_or(id))
        .and_then(non_empty);

    let property_url = match closest(card, &selectors.anchor).and_then(|a| a.value().attr("href")) {
        Some(href) => Some(absolute_url(href, base)?),
        None => None,
    };

    let price = first_text(card, &selectors.price).and_then(|text| clean_price(&text));

    let details = extract_details(strategies, card, selectors);

    let record = ListingRecord {
        property_title,
        property_url,
        price,
        beds: details.beds,
        baths: details.baths,
        address: details.address,
        property_type: details.property_type,
        sqft: details.sqft,
    };

    tracing::debug!(?record, "Extracted listing data");
    Ok(record)
}

/// Keeps digits and the decimal point. `"$1,250.50/mo"` -> `"1250.50"`.
pub fn clean_price(text: &str) -> Option<String> {
    non_empty(
        text.chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect::<String>(),
    )
}

fn absolute_url(href: &str, base: Option<&Url>) -> Result<String, ListingError> {
    let parsed = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    parsed.map(String::from).map_err(|e| ListingError::InvalidUrl {
        href: href.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::strategy::DEFAULT_STRATEGIES;
    use scraper::{Html, Selector};

    fn first_card(html: &Html) -> ElementRef<'_> {
        let selector = Selector::parse(r#"div[data-testid^="property-card-"]"#).unwrap();
        html.select(&selector).next().unwrap()
    }

    #[test]
    fn price_keeps_only_digits_and_dot() {
        assert_eq!(clean_price("$1,250.50 / month").as_deref(), Some("1250.50"));
        assert_eq!(clean_price("$2,000").as_deref(), Some("2000"));
        assert_eq!(clean_price("$ , /"), None);
        assert_eq!(clean_price(""), None);
    }

    #[test]
    fn bare_card_yields_sentinels_everywhere() {
        let html = Html::parse_document(r#"<div data-testid="property-card-"></div>"#);
        let selectors = ListingSelectors::compile().unwrap();

        let record = scrape_listing(first_card(&html), None, &selectors, DEFAULT_STRATEGIES).unwrap();

        assert_eq!(record, ListingRecord::default());
        assert!(record.export_fields().iter().all(|f| *f == "N/A"));
    }

    #[test]
    fn relative_link_resolves_against_page() {
        let html = Html::parse_document(
            r#"<a data-testid="native-link" href="/property/555"><div data-testid="property-card-555">
                 <span data-testid="price">$1,800</span>
               </div></a>"#,
        );
        let selectors = ListingSelectors::compile().unwrap();
        let base = Url::parse("https://www.furnishedfinder.com/housing/Austin").unwrap();

        let record =
            scrape_listing(first_card(&html), Some(&base), &selectors, DEFAULT_STRATEGIES).unwrap();

        assert_eq!(record.property_title.as_deref(), Some("555"));
        assert_eq!(
            record.property_url.as_deref(),
            Some("https://www.furnishedfinder.com/property/555")
        );
        assert_eq!(record.price.as_deref(), Some("1800"));
    }

    #[test]
    fn blank_price_placeholder_falls_back_to_second_candidate() {
        let html = Html::parse_document(
            r#"<div data-testid="property-card-8">
                 <span data-testid="price"></span>
                 <span class="text-black">$1,500</span>
               </div>"#,
        );
        let selectors = ListingSelectors::compile().unwrap();

        let record = scrape_listing(first_card(&html), None, &selectors, DEFAULT_STRATEGIES).unwrap();

        assert_eq!(record.price.as_deref(), Some("1500"));
    }

    #[test]
    fn relative_link_without_base_fails_the_card() {
        let html = Html::parse_document(
            r#"<a data-testid="native-link" href="/property/1"><div data-testid="property-card-1"></div></a>"#,
        );
        let selectors = ListingSelectors::compile().unwrap();

        let err = scrape_listing(first_card(&html), None, &selectors, DEFAULT_STRATEGIES).unwrap_err();
        assert!(matches!(err, ListingError::InvalidUrl { .. }));
    }
}
