pub mod listing;

pub use listing::{display, non_empty, ListingRecord, NOT_AVAILABLE};
