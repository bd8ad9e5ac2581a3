// src/extraction/wait.rs

use crate::errors::ScrapeError;
use crate::extraction::page::PageContext;
use crate::extraction::selectors;
use async_trait::async_trait;
use scraper::Html;
use std::time::Duration;
use tokio::time::Instant;

/// Paces the element wait. One tick per rendered frame.
#[async_trait]
pub trait FrameClock: Send + Sync {
    async fn next_frame(&self);
}

/// Frame pacing on the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct TokioFrameClock {
    pub frame: Duration,
}

impl TokioFrameClock {
    pub fn new(frame: Duration) -> Self {
        Self { frame }
    }
}

#[async_trait]
impl FrameClock for TokioFrameClock {
    async fn next_frame(&self) {
        tokio::time::sleep(self.frame).await;
    }
}

/// Polls the page once per frame until any of `candidates` matches.
///
/// Returns the candidate that matched. The page is checked right away, so an
/// element already present resolves without waiting a frame.
pub async fn wait_for_element(
    page: &PageContext,
    candidates: &[String],
    timeout: Duration,
    clock: &dyn FrameClock,
) -> Result<String, ScrapeError> {
    let compiled = selectors::parse_all(candidates)?;
    let started = Instant::now();
    tracing::debug!(selectors = %candidates.join(", "), "waiting for elements");

    loop {
        if let Some(index) = first_present(&page.markup(), &compiled) {
            let found = candidates[index].clone();
            tracing::debug!(selector = %found, elapsed = ?started.elapsed(), "found element");
            return Ok(found);
        }

        if started.elapsed() > timeout {
            let joined = candidates.join(", ");
            tracing::error!(selectors = %joined, "timeout waiting for elements");
            return Err(ScrapeError::Timeout(joined));
        }

        clock.next_frame().await;
    }
}

fn first_present(markup: &str, compiled: &[scraper::Selector]) -> Option<usize> {
    let document = Html::parse_document(markup);
    compiled
        .iter()
        .position(|selector| document.select(selector).next().is_some())
}
