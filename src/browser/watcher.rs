use tokio::sync::mpsc;
use url::Url;

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::dom::Page;
use crate::filter::LocationFilter;
use crate::CoursePage;

/// Remembers the last location seen so each navigation is handled once
#[derive(Debug, Clone, Default)]
pub struct NavigationWatcher {
    last_seen: Option<String>,
}

impl NavigationWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watcher that treats `location` as already handled
    pub fn starting_at(location: &Url) -> Self {
        let mut watcher = Self::new();
        watcher.observe(location);
        watcher
    }

    /// Record `location`; true when it differs from the previous one
    ///
    /// Fragment changes (`#module_12`) do not count as navigation.
    pub fn observe(&mut self, location: &Url) -> bool {
        let normalized = LocationFilter::normalize_url(location).to_string();
        if self.last_seen.as_deref() == Some(normalized.as_str()) {
            return false;
        }
        self.last_seen = Some(normalized);
        true
    }

    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }
}

/// Poll the browser location and re-extract whenever it lands on a new
/// modules page
///
/// The channel closes when the session goes away or the receiver is dropped.
pub fn watch(
    session: BrowserSession,
    config: Config,
    mut watcher: NavigationWatcher,
) -> mpsc::Receiver<CoursePage> {
    let (tx, rx) = mpsc::channel::<CoursePage>(16);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(config.poll_interval());
        loop {
            interval.tick().await;
            if tx.is_closed() {
                break;
            }

            let location = match session.current_url().await {
                Ok(location) => location,
                Err(e) => {
                    ::log::warn!("Stopped watching navigation: {}", e);
                    break;
                }
            };

            if !watcher.observe(&location) {
                continue;
            }
            if !LocationFilter::is_modules_page(&location) {
                ::log::trace!("Ignoring navigation to {}", location);
                continue;
            }

            ::log::info!("Modules page detected: {}", location);
            tokio::time::sleep(config.init_delay()).await;

            let source = match session.source().await {
                Ok(source) => source,
                Err(e) => {
                    ::log::error!("Failed to get source for {}: {}", location, e);
                    continue;
                }
            };

            // The parsed document is not Send; drop it before the next await
            let extracted = {
                let page = Page::parse(&source, Some(location));
                crate::extract(&page, &config)
            };
            let course_page = match extracted {
                Ok(course_page) => course_page,
                Err(e) => {
                    ::log::warn!("Skipping page: {}", e);
                    continue;
                }
            };
            if tx.send(course_page).await.is_err() {
                break;
            }
        }
        ::log::debug!("Navigation watcher finished");
    });

    rx
}
