// src/extraction/dom.rs

use crate::domain::non_empty;
use scraper::{ElementRef, Selector};

/// Trimmed text content of an element.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First non-blank text among `selectors`, tried in order. A blank match
/// falls through to the next candidate.
pub fn first_text(element: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        element
            .select(selector)
            .next()
            .and_then(|el| non_empty(text_of(el)))
    })
}

pub fn first_match<'a>(element: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| element.select(selector).next())
}

/// Nearest ancestor-or-self matching `selector`.
pub fn closest<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    std::iter::successors(Some(element), |el| el.parent().and_then(ElementRef::wrap))
        .find(|el| selector.matches(el))
}
