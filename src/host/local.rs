// src/host/local.rs

use crate::coordinator::{
    DownloadId, DownloadRequest, Downloader, EventBus, Notifier, ScriptInjector, TabMessenger,
};
use crate::errors::PlatformError;
use crate::extraction::{ExtractionEngine, PageContext};
use crate::messages::{Message, Tab, TabId};
use crate::spreadsheets::decode_data_url;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use url::Url;

const NO_RECEIVER: &str = "Could not establish connection. Receiving end does not exist.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// In-process stand-in for the browser: tabs are [`PageContext`]s, events go
/// through a broadcast channel, downloads land in a directory.
pub struct LocalHost {
    engine: Arc<ExtractionEngine>,
    tabs: Mutex<HashMap<TabId, Arc<PageContext>>>,
    next_tab: AtomicU32,
    events: broadcast::Sender<Message>,
    out_dir: PathBuf,
    next_download: AtomicU32,
    notifications: Mutex<Vec<Notification>>,
}

impl LocalHost {
    pub fn new(engine: Arc<ExtractionEngine>, out_dir: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            engine,
            tabs: Mutex::new(HashMap::new()),
            next_tab: AtomicU32::new(1),
            events,
            out_dir: out_dir.into(),
            next_download: AtomicU32::new(1),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Loads `markup` into a new tab.
    pub fn open_tab(&self, url: &str, markup: impl Into<String>) -> Tab {
        let id = TabId(self.next_tab.fetch_add(1, Ordering::Relaxed));
        let page = PageContext::new(Url::parse(url).ok(), markup);
        lock(&self.tabs).insert(id, Arc::new(page));

        tracing::debug!(%id, %url, "tab opened");
        Tab {
            id,
            url: url.to_string(),
        }
    }

    pub fn page(&self, tab: TabId) -> Option<Arc<PageContext>> {
        lock(&self.tabs).get(&tab).cloned()
    }

    /// Listener for coordinator events, e.g. for the popup.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.events.subscribe()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn page_or_err(&self, tab: TabId) -> Result<Arc<PageContext>, PlatformError> {
        self.page(tab)
            .ok_or_else(|| PlatformError::new(format!("No tab with id: {tab}.")))
    }
}

#[async_trait]
impl ScriptInjector for LocalHost {
    async fn inject(&self, tab: TabId) -> Result<(), PlatformError> {
        let page = self.page_or_err(tab)?;
        page.inject(Arc::clone(&self.engine));
        Ok(())
    }
}

#[async_trait]
impl TabMessenger for LocalHost {
    async fn send_to_tab(&self, tab: TabId, message: Message) -> Result<Message, PlatformError> {
        let page = self.page_or_err(tab)?;
        if !page.is_initialized() {
            return Err(PlatformError::new(NO_RECEIVER));
        }

        let reply = page.dispatch(message).await.ok_or_else(|| {
            PlatformError::new("The message port closed before a response was received.")
        })?;

        // Replies cross the context boundary as JSON, as they do in a browser
        let wire = serde_json::to_string(&reply).map_err(|e| PlatformError::new(e.to_string()))?;
        tracing::debug!(%tab, kind = reply.kind(), bytes = wire.len(), "reply from tab");
        serde_json::from_str(&wire).map_err(|e| PlatformError::new(e.to_string()))
    }
}

#[async_trait]
impl EventBus for LocalHost {
    async fn broadcast(&self, message: Message) -> Result<(), PlatformError> {
        self.events
            .send(message)
            .map(|_| ())
            .map_err(|_| PlatformError::new(NO_RECEIVER))
    }
}

#[async_trait]
impl Downloader for LocalHost {
    async fn download(&self, request: DownloadRequest) -> Result<DownloadId, PlatformError> {
        let (media_type, bytes) = decode_data_url(&request.url)
            .ok_or_else(|| PlatformError::new("Invalid URL"))?;

        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| PlatformError::new(e.to_string()))?;

        let target = if request.save_as {
            unique_path(&self.out_dir, &request.filename)
        } else {
            self.out_dir.join(&request.filename)
        };

        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|e| PlatformError::new(e.to_string()))?;

        let id = self.next_download.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            id,
            path = %target.display(),
            %media_type,
            bytes = bytes.len(),
            "download written"
        );
        Ok(id)
    }
}

impl Notifier for LocalHost {
    fn notify(&self, title: &str, message: &str) {
        tracing::warn!(%title, %message, "notification");
        lock(&self.notifications).push(Notification {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// `name.csv`, then `name (1).csv`, `name (2).csv`, ...
fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| dir.join(format!("{stem} ({n}){ext}")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
