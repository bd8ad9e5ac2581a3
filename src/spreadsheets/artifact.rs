// src/spreadsheets/artifact.rs

use crate::config::ExportFormat;
use crate::domain::ListingRecord;
use crate::errors::ScrapeError;
use crate::spreadsheets::{listings_to_csv, listings_to_xlsx};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mime::Mime;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A finished export, ready to hand to the downloader.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime: Mime,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn build(
        records: &[ListingRecord],
        format: ExportFormat,
        filename: &str,
    ) -> Result<Self, ScrapeError> {
        let (mime, bytes) = match format {
            ExportFormat::Csv => (mime::TEXT_CSV_UTF_8, listings_to_csv(records).into_bytes()),
            ExportFormat::Xlsx => {
                let mime: Mime = XLSX_MIME
                    .parse()
                    .map_err(|e| ScrapeError::Export(format!("bad mime type: {e}")))?;
                (mime, listings_to_xlsx(records)?)
            }
        };

        Ok(Self {
            filename: filename.to_string(),
            mime,
            bytes,
        })
    }

    /// `data:<type>[;param=value];base64,<payload>`
    pub fn data_url(&self) -> String {
        let mut media_type = self.mime.essence_str().to_string();
        for (name, value) in self.mime.params() {
            media_type.push_str(&format!(";{}={}", name, value));
        }
        format!("data:{};base64,{}", media_type, STANDARD.encode(&self.bytes))
    }
}

/// Inverse of [`ExportArtifact::data_url`] for base64 data URLs.
/// Returns the media type and the decoded payload.
pub fn decode_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let media_type = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((media_type.to_string(), bytes))
}
