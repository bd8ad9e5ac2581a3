// src/spreadsheets/export_xlsx.rs

use crate::domain::ListingRecord;
use crate::errors::ScrapeError;
use crate::spreadsheets::COLUMNS;
use rust_xlsxwriter::{Workbook, Worksheet};

/// Columns holding numbers when the page gave one.
const NUMERIC_COLUMNS: [usize; 4] = [1, 2, 3, 6];

pub fn listings_to_xlsx(records: &[ListingRecord]) -> Result<Vec<u8>, ScrapeError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet
        .set_name("Listings")
        .map_err(|e| ScrapeError::Export(format!("Failed to name worksheet: {}", e)))?;

    // Headers
    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ScrapeError::Export(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, record) in records.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, value) in record.export_fields().iter().enumerate() {
            write_cell(worksheet, r, col, value)?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ScrapeError::Export(format!("Failed to save workbook: {}", e)))
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: usize, value: &str) -> Result<(), ScrapeError> {
    let number = if NUMERIC_COLUMNS.contains(&col) {
        value.parse::<f64>().ok()
    } else {
        None
    };

    let written = match number {
        Some(n) => worksheet.write_number(row, col as u16, n).map(|_| ()),
        None => worksheet.write_string(row, col as u16, value).map(|_| ()),
    };

    written.map_err(|e| {
        ScrapeError::Export(format!(
            "Failed to write {} at row {}: {}",
            COLUMNS[col], row, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_is_a_zip_container() {
        let record = ListingRecord {
            property_title: Some("1".into()),
            price: Some("1200.50".into()),
            ..Default::default()
        };

        let bytes = listings_to_xlsx(&[record]).unwrap();

        // XLSX files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }
}
