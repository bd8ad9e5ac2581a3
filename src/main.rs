use anyhow::{bail, Context, Result};
use clap::Parser;
use rental_scraper::host::{fetch_page, read_page, LocalHost};
use rental_scraper::{
    Coordinator, ExportFormat, ExtractionEngine, Popup, PopupAction, PopupState, ScraperConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

const DEFAULT_TAB_URL: &str = "https://www.furnishedfinder.com/";

/// Scrape a Furnished Finder search results page into a spreadsheet.
#[derive(Debug, Parser)]
#[command(name = "rental_scraper", version)]
struct Cli {
    /// Saved results page to scrape
    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    file: Option<PathBuf>,

    /// Results page to fetch and scrape
    #[arg(long)]
    url: Option<Url>,

    /// Address the page is treated as loaded from (defaults to --url)
    #[arg(long)]
    tab_url: Option<String>,

    /// Where the download is written
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long, env = "SCRAPER_EXPORT_FORMAT")]
    format: Option<ExportFormat>,

    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Trigger through the toolbar icon path instead of the popup
    #[arg(long)]
    icon: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rental_scraper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = ScraperConfig::from_env().context("Failed to load configuration")?;
    if let Some(format) = cli.format {
        config.export_format = format;
    }
    if let Some(secs) = cli.timeout_secs {
        config.wait_timeout = Duration::from_secs(secs);
    }

    let markup = match (&cli.file, &cli.url) {
        (Some(path), _) => read_page(path).await?,
        (None, Some(url)) => fetch_page(url).await?,
        (None, None) => bail!("either --file or --url is required"),
    };

    let tab_url = cli
        .tab_url
        .clone()
        .or_else(|| cli.url.as_ref().map(|u| u.to_string()))
        .unwrap_or_else(|| DEFAULT_TAB_URL.to_string());

    let engine = Arc::new(ExtractionEngine::new(&config).context("Failed to build extraction engine")?);
    let host = Arc::new(LocalHost::new(engine, &cli.out_dir));
    let tab = host.open_tab(&tab_url, markup);
    let coordinator = Coordinator::new(Arc::clone(&host), config.clone());

    if cli.icon {
        coordinator.on_icon_clicked(&tab).await;
        if let Some(last) = host.notifications().last() {
            bail!("{}: {}", last.title, last.message);
        }
        return Ok(());
    }

    let mut events = host.subscribe();
    let mut popup = Popup::new(config);

    let Some(request) = popup.click(&tab) else {
        if let PopupState::Error(message) = popup.state() {
            bail!("{message}");
        }
        return Ok(());
    };

    let response = coordinator.handle_message(request).await;
    tracing::debug!(?response, "Response from background script");
    popup.on_response(&response);

    while let Ok(event) = events.try_recv() {
        if popup.on_event(&event) == PopupAction::Close {
            tracing::info!(out_dir = %host.out_dir().display(), "Scrape exported");
            break;
        }
    }

    match popup.state() {
        PopupState::Error(message) => bail!("{message}"),
        _ => Ok(()),
    }
}
