// src/tests/flow_tests.rs

use crate::config::ScraperConfig;
use crate::coordinator::{Coordinator, TabMessenger};
use crate::extraction::ExtractionEngine;
use crate::host::LocalHost;
use crate::messages::{Message, TabId};
use crate::popup::{Popup, PopupAction, PopupState};
use crate::tests::utils::{parse_csv, three_card_page, PAGE_URL};
use std::sync::Arc;
use std::time::Duration;

fn host_in(dir: &std::path::Path, config: &ScraperConfig) -> Arc<LocalHost> {
    let engine = Arc::new(ExtractionEngine::new(config).unwrap());
    Arc::new(LocalHost::new(engine, dir))
}

#[tokio::test(start_paused = true)]
async fn popup_click_to_csv_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScraperConfig::default();
    let host = host_in(dir.path(), &config);
    let tab = host.open_tab(PAGE_URL, three_card_page());
    let coordinator = Coordinator::new(Arc::clone(&host), config.clone());

    let mut events = host.subscribe();
    let mut popup = Popup::new(config);

    let request = popup.click(&tab).unwrap();
    let response = coordinator.handle_message(request).await;
    popup.on_response(&response);
    assert!(response.success, "{response:?}");

    let mut actions = Vec::new();
    while let Ok(event) = events.try_recv() {
        actions.push(popup.on_event(&event));
    }
    assert_eq!(actions, [PopupAction::Stay, PopupAction::Close]);
    assert_eq!(popup.state(), &PopupState::Idle);

    let csv = std::fs::read_to_string(dir.path().join("furnished_finder_listings.csv")).unwrap();
    let rows = parse_csv(&csv);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1][0], "101");
    assert_eq!(rows[1][7], "https://www.furnishedfinder.com/property/101");
    assert_eq!(rows[3][3], "1");
}

#[tokio::test(start_paused = true)]
async fn popup_shows_error_when_page_has_no_listings() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScraperConfig {
        wait_timeout: Duration::from_millis(100),
        ..Default::default()
    };
    let host = host_in(dir.path(), &config);
    let tab = host.open_tab(PAGE_URL, "<html><body>Nothing here</body></html>");
    let coordinator = Coordinator::new(Arc::clone(&host), config.clone());

    let mut events = host.subscribe();
    let mut popup = Popup::new(config);

    let request = popup.click(&tab).unwrap();
    let response = coordinator.handle_message(request).await;
    popup.on_response(&response);

    while let Ok(event) = events.try_recv() {
        popup.on_event(&event);
    }

    match popup.state() {
        PopupState::Error(message) => assert!(message.contains("Timeout waiting for elements")),
        other => panic!("expected error state, got {other:?}"),
    }
    assert_eq!(host.notifications().len(), 1);
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test(start_paused = true)]
async fn repeated_scrapes_reuse_injection_and_do_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScraperConfig::default();
    let host = host_in(dir.path(), &config);
    let tab = host.open_tab(PAGE_URL, three_card_page());
    let coordinator = Coordinator::new(Arc::clone(&host), config);

    assert!(coordinator.start_scraping(tab.id).await.success);
    assert!(coordinator.start_scraping(tab.id).await.success);

    assert!(host.page(tab.id).unwrap().is_initialized());
    assert!(dir.path().join("furnished_finder_listings.csv").exists());
    assert!(dir.path().join("furnished_finder_listings (1).csv").exists());
}

#[tokio::test]
async fn messages_to_uninjected_tab_have_no_receiver() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScraperConfig::default();
    let host = host_in(dir.path(), &config);
    let tab = host.open_tab(PAGE_URL, three_card_page());

    let err = host
        .send_to_tab(tab.id, Message::ScrapePage)
        .await
        .unwrap_err();
    assert!(err.message.contains("Receiving end does not exist"));

    let err = host
        .send_to_tab(TabId(404), Message::ScrapePage)
        .await
        .unwrap_err();
    assert!(err.message.contains("No tab with id"));
}

#[tokio::test]
async fn start_on_unknown_tab_fails_injection() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScraperConfig::default();
    let host = host_in(dir.path(), &config);
    let coordinator = Coordinator::new(Arc::clone(&host), config);

    let response = coordinator.start_scraping(TabId(77)).await;

    assert!(response
        .error
        .unwrap()
        .starts_with("Failed to inject content script"));
}

#[tokio::test(start_paused = true)]
async fn icon_click_on_target_site_exports_without_popup() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScraperConfig::default();
    let host = host_in(dir.path(), &config);
    let tab = host.open_tab(PAGE_URL, three_card_page());
    let coordinator = Coordinator::new(Arc::clone(&host), config);

    coordinator.on_icon_clicked(&tab).await;

    assert!(host.notifications().is_empty());
    assert!(dir.path().join("furnished_finder_listings.csv").exists());
}
