//! Everything that talks to a live browser

pub mod downloads;
pub mod session;
pub mod watcher;

pub use downloads::{DownloadReport, DownloadScope, Downloader, Progress, ScopeKey};
pub use session::BrowserSession;
pub use watcher::{NavigationWatcher, watch};

use std::future::Future;
use url::Url;

use crate::error::Error;

/// Something that can send the browser to a location
///
/// Downloads are triggered by navigating to the file's download URL; the
/// browser saves the response instead of replacing the page.
pub trait Navigator {
    /// Navigate to `url`
    fn open(&mut self, url: &Url) -> impl Future<Output = Result<(), Error>> + Send;
}
