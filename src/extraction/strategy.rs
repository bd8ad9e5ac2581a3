// src/extraction/strategy.rs

use crate::domain::non_empty;
use crate::extraction::dom::{first_match, first_text, text_of};
use crate::extraction::selectors::ListingSelectors;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::ElementRef;

lazy_static! {
    static ref BEDS: Regex = Regex::new(r"(?i)(\d+)\s*bed").unwrap();
    static ref BATHS: Regex = Regex::new(r"(?i)(\d+)\s*bath").unwrap();
    static ref SQFT: Regex = Regex::new(r"(?i)(\d[\d,]*)\s*sq\.?\s*ft").unwrap();
    static ref DIGITS: Regex = Regex::new(r"(\d+)").unwrap();
    static ref ROOM_LINE: Regex = Regex::new(
        r"(?i)^\s*(studio|\d+\s*(bed|bath)(room)?s?)(\s*[-/,•|]\s*(studio|\d+\s*(bed|bath)(room)?s?))*\s*$"
    )
    .unwrap();
    static ref AVAILABILITY: Regex =
        Regex::new(r"(?i)\b(un)?avail(able)?\b|\bmove[- ]?in\b|\bbooked\b").unwrap();
    static ref CATEGORY_DELIMITER: Regex = Regex::new(r"(?i)\s+in\b").unwrap();
}

/// Separates property type from the rest of a flat details line.
const DETAILS_SEPARATOR: char = '•';

/// Card fields whose location depends on the page layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDetails {
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub address: Option<String>,
    pub property_type: Option<String>,
    pub sqft: Option<String>,
}

/// One way of reading a card, tied to one revision of the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Cards carrying a structured tooltip block
    /// (`3 Bedroom - 2 Bathroom`, address, availability lines).
    Tooltip,
    /// Cards with a single `Type • N bed • N bath` details line.
    FlatDetails,
}

/// Preference order. The first strategy that applies to a card wins.
pub const DEFAULT_STRATEGIES: &[ExtractionStrategy] =
    &[ExtractionStrategy::Tooltip, ExtractionStrategy::FlatDetails];

impl ExtractionStrategy {
    pub fn name(self) -> &'static str {
        match self {
            ExtractionStrategy::Tooltip => "tooltip",
            ExtractionStrategy::FlatDetails => "flat-details",
        }
    }

    /// `None` when the card does not have the layout this strategy reads.
    pub fn extract(
        self,
        card: ElementRef<'_>,
        selectors: &ListingSelectors,
    ) -> Option<ListingDetails> {
        match self {
            ExtractionStrategy::Tooltip => extract_tooltip(card, selectors),
            ExtractionStrategy::FlatDetails => Some(extract_flat(card, selectors)),
        }
    }
}

/// Runs `strategies` in order and returns the first result.
pub fn extract_details(
    strategies: &[ExtractionStrategy],
    card: ElementRef<'_>,
    selectors: &ListingSelectors,
) -> ListingDetails {
    for strategy in strategies {
        if let Some(details) = strategy.extract(card, selectors) {
            tracing::trace!(strategy = strategy.name(), "strategy applied");
            return details;
        }
    }
    ListingDetails::default()
}

fn extract_flat(card: ElementRef<'_>, selectors: &ListingSelectors) -> ListingDetails {
    let details = card
        .select(&selectors.details)
        .next()
        .map(text_of)
        .unwrap_or_default();

    ListingDetails {
        beds: capture(&BEDS, &details),
        baths: capture(&BATHS, &details),
        address: first_text(card, &selectors.address),
        property_type: type_from_details(&details),
        sqft: sqft_in(&details),
    }
}

fn extract_tooltip(card: ElementRef<'_>, selectors: &ListingSelectors) -> Option<ListingDetails> {
    let block = first_match(card, &selectors.tooltip)?;
    let segments = tooltip_segments(block);

    let details_text = card
        .select(&selectors.details)
        .next()
        .map(text_of)
        .unwrap_or_default();

    let (beds, baths) = rooms_in(&segments);

    let sqft = segments
        .iter()
        .find_map(|s| sqft_in(s))
        .or_else(|| sqft_in(&details_text));

    let address = segments
        .iter()
        .find(|s| !ROOM_LINE.is_match(s) && !AVAILABILITY.is_match(s) && !SQFT.is_match(s))
        .cloned();

    let property_type = card
        .select(&selectors.category)
        .next()
        .map(text_of)
        .and_then(|text| type_from_category(&text))
        .or_else(|| type_from_details(&details_text));

    Some(ListingDetails {
        beds,
        baths,
        address,
        property_type,
        sqft,
    })
}

/// Non-empty lines of a tooltip block: one per child element, or the block
/// text split on `|` and newlines when it has no child elements.
fn tooltip_segments(block: ElementRef<'_>) -> Vec<String> {
    let children: Vec<String> = block
        .children()
        .filter_map(ElementRef::wrap)
        .map(text_of)
        .filter(|s| !s.is_empty())
        .collect();

    if !children.is_empty() {
        return children;
    }

    text_of(block)
        .split(|c: char| c == '|' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Beds and baths from the segments made up only of room counts. Other
/// lines (address, availability) never contribute digits.
fn rooms_in(segments: &[String]) -> (Option<String>, Option<String>) {
    let mut beds = None;
    let mut baths = None;
    for line in segments.iter().filter(|s| ROOM_LINE.is_match(s)) {
        let (line_beds, line_baths) = split_bed_bath(line);
        beds = beds
            .or(line_beds)
            .or_else(|| capture(&BEDS, line));
        baths = baths
            .or(line_baths)
            .or_else(|| capture(&BATHS, line));
    }
    (beds, baths)
}

/// `"3 Bedroom - 2 Bathroom"` -> `(Some("3"), Some("2"))`.
pub fn split_bed_bath(segment: &str) -> (Option<String>, Option<String>) {
    let (left, right) = match segment.split_once('-') {
        Some(halves) => halves,
        None => (segment, ""),
    };

    let mut beds = None;
    let mut baths = None;
    for half in [left, right] {
        let digits = capture(&DIGITS, half);
        if mentions(half, "bed") {
            beds = beds.or(digits);
        } else if mentions(half, "bath") {
            baths = baths.or(digits);
        }
    }
    (beds, baths)
}

/// `"Apartment in Austin, TX"` -> `"Apartment"`.
pub fn type_from_category(text: &str) -> Option<String> {
    let head = match CATEGORY_DELIMITER.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    };
    non_empty(head.trim())
}

/// `"Apartment • 2 beds • 1 bath"` -> `"Apartment"`.
pub fn type_from_details(details: &str) -> Option<String> {
    details
        .split(DETAILS_SEPARATOR)
        .next()
        .and_then(|head| non_empty(head.trim()))
}

fn sqft_in(text: &str) -> Option<String> {
    capture(&SQFT, text).and_then(|n| non_empty(n.replace(',', "")))
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn mentions(text: &str, word: &str) -> bool {
    text.to_ascii_lowercase().contains(word)
}
