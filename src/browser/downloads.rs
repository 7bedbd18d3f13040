use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::browser::Navigator;
use crate::config::{Capabilities, Capability, Config};
use crate::error::Error;
use crate::filter::LocationFilter;
use crate::model::{Hierarchy, Item};

/// How a module or section is named in a download scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKey {
    Title(String),
    Id(String),
}

impl ScopeKey {
    fn matches(&self, id: &str, title: &str) -> bool {
        match self {
            ScopeKey::Title(wanted) => title == wanted,
            ScopeKey::Id(wanted) => id == wanted,
        }
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::Title(title) => write!(f, "title {title:?}"),
            ScopeKey::Id(id) => write!(f, "id {id:?}"),
        }
    }
}

/// Which attachments a download covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadScope {
    All,
    Module(ScopeKey),
    Section(ScopeKey),
}

impl DownloadScope {
    /// Capability that has to be enabled for this scope
    pub fn capability(&self) -> Capability {
        match self {
            DownloadScope::All => Capability::GlobalDownload,
            DownloadScope::Module(_) => Capability::ModuleDownload,
            DownloadScope::Section(_) => Capability::SectionDownload,
        }
    }

    /// Pause between two files of this scope
    pub fn delay(&self, config: &Config) -> Duration {
        match self {
            DownloadScope::All => config.download_delay(),
            DownloadScope::Module(_) | DownloadScope::Section(_) => config.section_download_delay(),
        }
    }

    /// Attachments of `hierarchy` covered by this scope
    ///
    /// A title shared by several modules or sections is refused rather
    /// than resolved to the first one.
    pub fn select<'h>(&self, hierarchy: &'h Hierarchy) -> Result<&'h [Item], Error> {
        match self {
            DownloadScope::All => Ok(&hierarchy.all_attachments),
            DownloadScope::Module(key) => {
                let matches: Vec<_> = hierarchy
                    .modules
                    .iter()
                    .filter(|module| key.matches(&module.id, &module.title))
                    .map(|module| (module.id.as_str(), module.attachments.as_slice()))
                    .collect();
                single(key, matches)
            }
            DownloadScope::Section(key) => {
                let matches: Vec<_> = hierarchy
                    .sections
                    .iter()
                    .filter(|section| key.matches(&section.id, &section.title))
                    .map(|section| (section.id.as_str(), section.attachments.as_slice()))
                    .collect();
                single(key, matches)
            }
        }
    }
}

fn single<'h>(key: &ScopeKey, matches: Vec<(&'h str, &'h [Item])>) -> Result<&'h [Item], Error> {
    match matches.as_slice() {
        [] => Err(Error::UnknownScope(key.to_string())),
        [(_, attachments)] => Ok(*attachments),
        _ => Err(Error::AmbiguousScope {
            key: key.to_string(),
            count: matches.len(),
            ids: matches
                .iter()
                .map(|(id, _)| *id)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

impl FromStr for DownloadScope {
    type Err = Error;

    /// `all`, `module:<title>`, `module-id:<id>`, `section:<title>` or
    /// `section-id:<id>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(DownloadScope::All);
        }
        let Some((kind, value)) = s.split_once(':') else {
            return Err(Error::UnknownScope(format!("scope {s:?}")));
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::UnknownScope(format!("scope {s:?}")));
        }
        match kind {
            "module" => Ok(DownloadScope::Module(ScopeKey::Title(value.to_string()))),
            "module-id" => Ok(DownloadScope::Module(ScopeKey::Id(value.to_string()))),
            "section" => Ok(DownloadScope::Section(ScopeKey::Title(value.to_string()))),
            "section-id" => Ok(DownloadScope::Section(ScopeKey::Id(value.to_string()))),
            _ => Err(Error::UnknownScope(format!("scope {s:?}"))),
        }
    }
}

/// Where a running download is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current file
    pub index: usize,
    pub total: usize,
    pub title: String,
}

/// Outcome of a batch download
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub triggered: usize,
    pub failed: usize,
}

/// Triggers attachment downloads one at a time
pub struct Downloader<'a, N: Navigator> {
    navigator: &'a mut N,
    filter: LocationFilter,
}

impl<'a, N: Navigator> Downloader<'a, N> {
    pub fn new(navigator: &'a mut N, filter: LocationFilter) -> Self {
        Self { navigator, filter }
    }

    /// Download every attachment of `scope`, if its capability allows it
    pub async fn download_scope<F>(
        &mut self,
        hierarchy: &Hierarchy,
        scope: &DownloadScope,
        capabilities: &Capabilities,
        config: &Config,
        on_progress: F,
    ) -> Result<DownloadReport, Error>
    where
        F: FnMut(&Progress),
    {
        capabilities.require(scope.capability())?;
        let attachments = scope.select(hierarchy)?;
        Ok(self
            .download(attachments, scope.delay(config), on_progress)
            .await)
    }

    /// Navigate to each attachment's download URL in order, pausing `delay`
    /// after every file
    ///
    /// Failures are counted and skipped; nothing is retried.
    pub async fn download<F>(
        &mut self,
        attachments: &[Item],
        delay: Duration,
        mut on_progress: F,
    ) -> DownloadReport
    where
        F: FnMut(&Progress),
    {
        let mut report = DownloadReport::default();
        if attachments.is_empty() {
            ::log::warn!("No downloadable attachments found.");
            return report;
        }

        let total = attachments.len();
        for (index, attachment) in attachments.iter().enumerate() {
            on_progress(&Progress {
                index: index + 1,
                total,
                title: attachment.title.clone(),
            });

            let Some(target) = attachment
                .download_info
                .as_ref()
                .and_then(|info| self.filter.resolve_download(&info.download_url))
            else {
                ::log::warn!("Skipping {}: no usable download URL", attachment.title);
                report.failed += 1;
                continue;
            };

            match self.navigator.open(&target).await {
                Ok(()) => {
                    ::log::info!("({}/{}) {}", index + 1, total, attachment.title);
                    report.triggered += 1;
                }
                Err(e) => {
                    ::log::error!("Failed to download {}: {}", attachment.title, e);
                    report.failed += 1;
                }
            }

            tokio::time::sleep(delay).await;
        }

        ::log::info!(
            "Download finished: {} triggered, {} failed",
            report.triggered,
            report.failed
        );
        report
    }
}
