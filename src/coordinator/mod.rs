mod coordinator;
mod platform;

pub use coordinator::Coordinator;
pub use platform::{
    DownloadId, DownloadRequest, Downloader, EventBus, Notifier, Platform, ScriptInjector,
    TabMessenger,
};
