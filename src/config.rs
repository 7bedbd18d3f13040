use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Optional affordances offered on top of the extracted hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    GlobalDownload,
    ModuleDownload,
    SectionDownload,
    ItemDownload,
    MarkdownTree,
    PdfTree,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::GlobalDownload,
        Capability::ModuleDownload,
        Capability::SectionDownload,
        Capability::ItemDownload,
        Capability::MarkdownTree,
        Capability::PdfTree,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Capability::GlobalDownload => "global_download",
            Capability::ModuleDownload => "module_download",
            Capability::SectionDownload => "section_download",
            Capability::ItemDownload => "item_download",
            Capability::MarkdownTree => "markdown_tree",
            Capability::PdfTree => "pdf_tree",
        }
    }
}

/// Capability name to enabled flag; capabilities not listed are enabled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(BTreeMap<Capability, bool>);

impl Capabilities {
    /// Everything enabled
    pub fn full() -> Self {
        Self(Capability::ALL.iter().map(|c| (*c, true)).collect())
    }

    /// File downloads and the printable tree, without the Markdown tree
    pub fn pdf_only() -> Self {
        Self::full().with(Capability::MarkdownTree, false)
    }

    pub fn with(mut self, capability: Capability, enabled: bool) -> Self {
        self.0.insert(capability, enabled);
        self
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.0.get(&capability).copied().unwrap_or(true)
    }

    /// `Err` naming the capability when it is switched off
    pub fn require(&self, capability: Capability) -> Result<(), crate::error::Error> {
        if self.is_enabled(capability) {
            Ok(())
        } else {
            Err(crate::error::Error::CapabilityDisabled(capability.name()))
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Pause after each file of a whole-course download
    #[serde(default = "default_download_delay_ms")]
    pub download_delay_ms: u64,

    /// Pause after each file of a module or section download
    #[serde(default = "default_section_download_delay_ms")]
    pub section_download_delay_ms: u64,

    /// Settle time before extracting a freshly navigated page
    #[serde(default = "default_init_delay_ms")]
    pub init_delay_ms: u64,

    /// How often the navigation watcher checks the current location
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Used when no course name can be found on the page
    #[serde(default = "default_course_name")]
    pub default_course_name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub capabilities: Capabilities,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            download_delay_ms: default_download_delay_ms(),
            section_download_delay_ms: default_section_download_delay_ms(),
            init_delay_ms: default_init_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            default_course_name: default_course_name(),
            version: default_version(),
            capabilities: Capabilities::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    pub fn section_download_delay(&self) -> Duration {
        Duration::from_millis(self.section_download_delay_ms)
    }

    pub fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_download_delay_ms() -> u64 {
    500
}

fn default_section_download_delay_ms() -> u64 {
    600
}

fn default_init_delay_ms() -> u64 {
    500
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// Default course name when the page offers none
fn default_course_name() -> String {
    "Canvas Course".to_string()
}

fn default_version() -> String {
    "5.0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.download_delay(), Duration::from_millis(500));
        assert_eq!(config.section_download_delay(), Duration::from_millis(600));
        assert_eq!(config.default_course_name, "Canvas Course");
        assert!(config.capabilities.is_enabled(Capability::MarkdownTree));
    }

    #[test]
    fn test_capabilities_from_json() {
        let config = Config::from_json(
            r#"{"version": "5.0-PDF", "capabilities": {"markdown_tree": false, "pdf_tree": true}}"#,
        )
        .unwrap();
        assert_eq!(config.version, "5.0-PDF");
        assert!(!config.capabilities.is_enabled(Capability::MarkdownTree));
        assert!(config.capabilities.is_enabled(Capability::PdfTree));
        // Unlisted capabilities stay on
        assert!(config.capabilities.is_enabled(Capability::GlobalDownload));
        assert_eq!(
            config.capabilities,
            Capabilities::default()
                .with(Capability::MarkdownTree, false)
                .with(Capability::PdfTree, true)
        );
    }

    #[test]
    fn test_presets() {
        let pdf = Capabilities::pdf_only();
        assert!(!pdf.is_enabled(Capability::MarkdownTree));
        assert!(pdf.require(Capability::PdfTree).is_ok());
        assert!(pdf.require(Capability::MarkdownTree).is_err());
        assert!(Capability::ALL.iter().all(|c| Capabilities::full().is_enabled(*c)));
    }

    #[test]
    fn test_unknown_capability_is_rejected() {
        assert!(Config::from_json(r#"{"capabilities": {"teleport": true}}"#).is_err());
    }
}
