use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static MODULES_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/courses/\d+/modules/?$").unwrap());

/// Decides which browser locations and download targets are in scope
///
/// Downloads stay on the origin of the course page; anything else is
/// rejected rather than navigated to.
#[derive(Debug, Clone)]
pub struct LocationFilter {
    origin: Url,
}

impl LocationFilter {
    /// Create a filter for pages loaded from `page_url`
    pub fn new(page_url: &Url) -> Self {
        Self {
            origin: page_url.clone(),
        }
    }

    /// Whether `url` is a course modules page worth extracting
    pub fn is_modules_page(url: &Url) -> bool {
        MODULES_PATH.is_match(url.path())
    }

    /// Absolute download target for `download_url`, if it is same-origin
    pub fn resolve_download(&self, download_url: &str) -> Option<Url> {
        let resolved = self.origin.join(download_url).ok()?;
        if resolved.origin() == self.origin.origin() {
            Some(resolved)
        } else {
            ::log::warn!("Refusing cross-origin download: {}", resolved);
            None
        }
    }

    /// Create a normalized version of the URL (e.g., removing fragments)
    pub fn normalize_url(url: &Url) -> Url {
        let mut normalized = url.clone();
        normalized.set_fragment(None);
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> LocationFilter {
        let page = Url::parse("https://canvas.example.edu/courses/9001/modules").unwrap();
        LocationFilter::new(&page)
    }

    #[test]
    fn test_modules_page_detection() {
        let modules =
            Url::parse("https://canvas.example.edu/courses/9001/modules#module_5").unwrap();
        assert!(LocationFilter::is_modules_page(&modules));

        let item = Url::parse("https://canvas.example.edu/courses/9001/modules/items/4").unwrap();
        assert!(!LocationFilter::is_modules_page(&item));

        let dashboard = Url::parse("https://canvas.example.edu/").unwrap();
        assert!(!LocationFilter::is_modules_page(&dashboard));
    }

    #[test]
    fn test_download_is_resolved_on_page_origin() {
        let resolved = filter()
            .resolve_download("/courses/9001/files/48213/download?download_frd=1")
            .unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://canvas.example.edu/courses/9001/files/48213/download?download_frd=1"
        );
    }

    #[test]
    fn test_cross_origin_download_is_rejected() {
        assert!(filter().resolve_download("https://evil.example.com/file").is_none());
    }

    #[test]
    fn test_normalize_url() {
        let url = Url::parse("https://canvas.example.edu/courses/9001/modules#m1").unwrap();
        assert_eq!(
            LocationFilter::normalize_url(&url).as_str(),
            "https://canvas.example.edu/courses/9001/modules"
        );
    }
}
