pub mod artifact;
pub mod export_csv;
pub mod export_xlsx;

pub use artifact::{decode_data_url, ExportArtifact};
pub use export_csv::listings_to_csv;
pub use export_xlsx::listings_to_xlsx;

/// Canonical export schema, shared by every format.
pub const COLUMNS: [&str; 8] = [
    "Property Title",
    "Price",
    "Beds",
    "Baths",
    "Address",
    "Property Type",
    "Square Feet",
    "Property URL",
];
