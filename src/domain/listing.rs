// src/domain/listing.rs

use serde::{Deserialize, Serialize};

/// Written in place of any field the page did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// One scraped property card.
///
/// Every field is optional while the record lives inside the crate. At the
/// edges (message JSON, CSV, XLSX) a missing field is always written as
/// [`NOT_AVAILABLE`], so consumers see all eight fields on every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingRecord {
    #[serde(with = "sentinel")]
    pub property_title: Option<String>,
    #[serde(with = "sentinel")]
    pub property_url: Option<String>,
    #[serde(with = "sentinel")]
    pub price: Option<String>,
    #[serde(with = "sentinel")]
    pub beds: Option<String>,
    #[serde(with = "sentinel")]
    pub baths: Option<String>,
    #[serde(with = "sentinel")]
    pub address: Option<String>,
    #[serde(with = "sentinel")]
    pub property_type: Option<String>,
    #[serde(with = "sentinel")]
    pub sqft: Option<String>,
}

impl ListingRecord {
    /// Field values in canonical export order, sentinel applied.
    /// Order matches [`crate::spreadsheets::COLUMNS`].
    pub fn export_fields(&self) -> [&str; 8] {
        [
            display(&self.property_title),
            display(&self.price),
            display(&self.beds),
            display(&self.baths),
            display(&self.address),
            display(&self.property_type),
            display(&self.sqft),
            display(&self.property_url),
        ]
    }
}

/// Sentinel-aware view of an optional field.
pub fn display(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Treats blank strings as missing.
pub fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

mod sentinel {
    use super::NOT_AVAILABLE;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(NOT_AVAILABLE))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|s| s != NOT_AVAILABLE))
    }
}
