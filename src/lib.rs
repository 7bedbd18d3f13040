pub mod browser;
pub mod config;
pub mod controls;
pub mod dom;
pub mod error;
pub mod filter;
pub mod model;
pub mod parsers;
pub mod render;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{Capabilities, Capability, Config};
pub use dom::Page;
pub use error::{Error, Skip};
pub use model::{DownloadInfo, Hierarchy, Item, ItemType, Module, Section};
pub use parsers::HierarchyBuilder;

use std::path::{Path, PathBuf};
use url::Url;

use crate::browser::BrowserSession;
use crate::render::TreeContext;

/// Where a modules page comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// Course modules URL opened in a WebDriver browser
    Web(String),
    /// Saved copy of the page, with the address it was saved from
    File {
        path: PathBuf,
        page_url: Option<String>,
    },
}

/// One extraction pass over a modules page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePage {
    pub hierarchy: Hierarchy,
    pub current_user: String,
    pub url: Url,
}

impl CoursePage {
    pub fn tree_context(&self) -> TreeContext {
        TreeContext {
            current_user: self.current_user.clone(),
        }
    }
}

/// Build the hierarchy of a parsed modules page
///
/// The page URL is required: it carries the course id and is the base
/// for item links.
pub fn extract(page: &Page, config: &Config) -> Result<CoursePage, Error> {
    let url = page
        .url()
        .cloned()
        .ok_or_else(|| Error::MissingCourseId("a page without URL".to_string()))?;
    let course_id =
        parsers::course::course_id(&url).ok_or_else(|| Error::MissingCourseId(url.to_string()))?;
    let course_name = parsers::course::course_name(page, &config.default_course_name);

    let hierarchy = HierarchyBuilder::new(course_id, course_name)
        .with_base_url(url.clone())
        .build(&page.root());

    ::log::info!(
        "Canvas Parser (v{}) initialized: Found {} total attachments and {} total items.",
        config.version,
        hierarchy.all_attachments.len(),
        hierarchy.all_items.len()
    );

    Ok(CoursePage {
        hierarchy,
        current_user: parsers::course::current_user(page),
        url,
    })
}

/// Extract from a saved HTML file
pub fn load_file(
    path: impl AsRef<Path>,
    page_url: Option<&str>,
    config: &Config,
) -> Result<CoursePage, Error> {
    let source = std::fs::read_to_string(path)?;
    let url = page_url.map(Url::parse).transpose()?;
    extract(&Page::parse(&source, url), config)
}

/// Open `url` in the browser and extract once the page has settled
pub async fn load_web(
    session: &BrowserSession,
    url: &Url,
    config: &Config,
) -> Result<CoursePage, Error> {
    session.goto(url).await?;
    tokio::time::sleep(config.init_delay()).await;

    let source = session.source().await?;
    let location = session.current_url().await?;
    extract(&Page::parse(&source, Some(location)), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULES_PAGE: &str = include_str!("parsers/tests/fixtures/modules_page.html");

    #[test]
    fn test_extract_fixture() {
        let url = Url::parse("https://canvas.example.edu/courses/9001/modules").unwrap();
        let page = Page::parse(MODULES_PAGE, Some(url.clone()));
        let course_page = extract(&page, &Config::default()).unwrap();

        assert_eq!(course_page.url, url);
        assert_eq!(course_page.current_user, "Ada Lovelace");
        assert_eq!(course_page.hierarchy.course_id, "9001");
        assert_eq!(course_page.hierarchy.modules.len(), 2);
        assert_eq!(course_page.tree_context().current_user, "Ada Lovelace");
    }

    #[test]
    fn test_extract_requires_course_url() {
        let page = Page::parse(MODULES_PAGE, None);
        assert!(matches!(
            extract(&page, &Config::default()),
            Err(Error::MissingCourseId(_))
        ));

        let dashboard = Url::parse("https://canvas.example.edu/dashboard").unwrap();
        let page = Page::parse(MODULES_PAGE, Some(dashboard));
        assert!(matches!(
            extract(&page, &Config::default()),
            Err(Error::MissingCourseId(_))
        ));
    }
}
