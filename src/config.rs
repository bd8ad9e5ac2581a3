// src/config.rs

use crate::errors::ScrapeError;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TARGET_DOMAIN: &str = "furnishedfinder.com";
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);
/// One animation frame at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const DEFAULT_EXPORT_STEM: &str = "furnished_finder_listings";

/// Spreadsheet flavour produced for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unknown export format '{other}' (expected csv or xlsx)")),
        }
    }
}

/// Settings shared by the engine, the coordinator and the popup.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Host the popup and icon click accept as the target site.
    pub target_domain: String,
    /// Ordered candidates for the listings container.
    pub container_selectors: Vec<String>,
    pub wait_timeout: Duration,
    pub frame_interval: Duration,
    pub export_format: ExportFormat,
    pub export_stem: String,
    /// Ask the user where to save the download.
    pub save_as: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            target_domain: DEFAULT_TARGET_DOMAIN.to_string(),
            container_selectors: vec!["#serp_default_view".to_string()],
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            export_format: ExportFormat::Csv,
            export_stem: DEFAULT_EXPORT_STEM.to_string(),
            save_as: true,
        }
    }
}

impl ScraperConfig {
    /// Defaults overridden by `SCRAPER_*` environment variables (and `.env`).
    pub fn from_env() -> Result<Self, ScrapeError> {
        // Load .env file if present (development)
        let _ = dotenv();

        let mut config = Self::default();

        if let Ok(domain) = env::var("SCRAPER_TARGET_DOMAIN") {
            config.target_domain = domain;
        }
        if let Ok(secs) = env::var("SCRAPER_WAIT_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ScrapeError::Config("SCRAPER_WAIT_TIMEOUT_SECS must be a whole number".into())
            })?;
            config.wait_timeout = Duration::from_secs(secs);
        }
        if let Ok(millis) = env::var("SCRAPER_FRAME_MILLIS") {
            let millis: u64 = millis.parse().map_err(|_| {
                ScrapeError::Config("SCRAPER_FRAME_MILLIS must be a whole number".into())
            })?;
            config.frame_interval = Duration::from_millis(millis.max(1));
        }
        if let Ok(format) = env::var("SCRAPER_EXPORT_FORMAT") {
            config.export_format = format.parse().map_err(ScrapeError::Config)?;
        }
        if let Ok(stem) = env::var("SCRAPER_EXPORT_STEM") {
            config.export_stem = stem;
        }

        Ok(config)
    }

    pub fn export_filename(&self) -> String {
        format!("{}.{}", self.export_stem, self.export_format.extension())
    }

    /// Whether `url` points at the target site (host equal to or under the
    /// target domain).
    pub fn is_target_site(&self, url: &str) -> bool {
        let Ok(parsed) = url::Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        let domain = self.target_domain.trim_start_matches('.');
        host == domain || host.ends_with(&format!(".{domain}"))
    }
}
