mod fetch;
mod local;

pub use fetch::{fetch_page, read_page};
pub use local::{LocalHost, Notification};
