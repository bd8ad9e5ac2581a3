// src/spreadsheets/export_csv.rs

use crate::domain::ListingRecord;
use crate::spreadsheets::COLUMNS;

/// Header row plus one row per record. Every field is quoted with `"`
/// doubled; rows are joined with `\n` and there is no trailing newline.
pub fn listings_to_csv(records: &[ListingRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(COLUMNS.join(","));

    for record in records {
        lines.push(csv_row(&record.export_fields()));
    }

    lines.join("\n")
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| quote(field))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
