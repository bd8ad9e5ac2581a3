// src/coordinator/platform.rs

use crate::errors::PlatformError;
use crate::messages::{Message, TabId};
use async_trait::async_trait;

/// What the coordinator asks the downloader for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// `data:` URL carrying the file.
    pub url: String,
    pub filename: String,
    /// Prompt the user for a save location.
    pub save_as: bool,
}

pub type DownloadId = u32;

/// Loads the content script into a tab.
#[async_trait]
pub trait ScriptInjector: Send + Sync {
    async fn inject(&self, tab: TabId) -> Result<(), PlatformError>;
}

/// Request/response channel to the script running in a tab.
#[async_trait]
pub trait TabMessenger: Send + Sync {
    async fn send_to_tab(&self, tab: TabId, message: Message) -> Result<Message, PlatformError>;
}

/// Fan-out to extension views (the popup). Fails when nobody listens.
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn broadcast(&self, message: Message) -> Result<(), PlatformError>;
}

#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, request: DownloadRequest) -> Result<DownloadId, PlatformError>;
}

/// User-facing notifications. Fire and forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Everything the coordinator needs from its host.
pub trait Platform: ScriptInjector + TabMessenger + EventBus + Downloader + Notifier {}

impl<T> Platform for T where T: ScriptInjector + TabMessenger + EventBus + Downloader + Notifier {}
