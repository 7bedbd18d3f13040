use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Read-only query primitives the extractors rely on
///
/// Selection is scoped to the node's descendants and yields matches in
/// document order. Nothing here mutates the tree.
pub trait DomNode: Copy {
    /// First descendant matching `selector`
    fn select_first(&self, selector: &Selector) -> Option<Self>;

    /// All descendants matching `selector`
    fn select_all(&self, selector: &Selector) -> Vec<Self>;

    /// Raw `class` attribute, empty when absent
    fn class_string(&self) -> &str;

    fn has_class(&self, class: &str) -> bool;

    fn attr(&self, name: &str) -> Option<&str>;

    /// The node's own `id` attribute
    fn node_id(&self) -> Option<&str>;

    /// Whether any element above this node carries `class`
    fn has_ancestor_with_class(&self, class: &str) -> bool;

    /// Rendered text content, trimmed
    fn text(&self) -> String;
}

impl<'a> DomNode for ElementRef<'a> {
    fn select_first(&self, selector: &Selector) -> Option<Self> {
        self.select(selector).next()
    }

    fn select_all(&self, selector: &Selector) -> Vec<Self> {
        self.select(selector).collect()
    }

    fn class_string(&self) -> &str {
        self.value().attr("class").unwrap_or("")
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn node_id(&self) -> Option<&str> {
        self.value().id()
    }

    fn has_ancestor_with_class(&self, class: &str) -> bool {
        self.ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| ancestor.value().classes().any(|c| c == class))
    }

    fn text(&self) -> String {
        text_content(self)
    }
}

fn text_content(element: &ElementRef<'_>) -> String {
    ElementRef::text(element).collect::<String>().trim().to_string()
}

/// A parsed snapshot of a course page
pub struct Page {
    html: Html,
    url: Option<Url>,
}

impl Page {
    /// Parse a full HTML document; `url` is the address it was loaded from
    pub fn parse(source: &str, url: Option<Url>) -> Self {
        Self {
            html: Html::parse_document(source),
            url,
        }
    }

    /// Document-wide query scope
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Text of the `<title>` element
    pub fn document_title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|title| text_content(&title))
    }
}

/// Resolve `href` the way a browser's `.href` does
///
/// Without a base the attribute is returned unchanged.
pub fn resolve_href(href: &str, base: Option<&Url>) -> String {
    match base {
        Some(base) => match base.join(href) {
            Ok(resolved) => resolved.to_string(),
            Err(e) => {
                ::log::debug!("Could not resolve href {} against {}: {}", href, base, e);
                href.to_string()
            }
        },
        None => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_trimmed_and_concatenated() {
        let page = Page::parse(
            "<html><body><div id=\"a\" class=\"x y\">  Week <b>1</b>  </div></body></html>",
            None,
        );
        let selector = Selector::parse("#a").unwrap();
        let node = page.root().select_first(&selector).unwrap();
        assert_eq!(DomNode::text(&node), "Week 1");
        assert_eq!(node.class_string(), "x y");
        assert!(node.has_class("y"));
        assert!(!node.has_class("z"));
        assert_eq!(node.node_id(), Some("a"));
    }

    #[test]
    fn test_select_all_keeps_document_order() {
        let page = Page::parse(
            "<ul><li class=\"i\">1</li><li><span class=\"i\">2</span></li><li class=\"i\">3</li></ul>",
            None,
        );
        let selector = Selector::parse(".i").unwrap();
        let texts: Vec<String> = page
            .root()
            .select_all(&selector)
            .iter()
            .map(DomNode::text)
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_ancestor_classes() {
        let page = Page::parse(
            "<div class=\"outer\"><p><span id=\"inner\" class=\"outer\">x</span></p></div><i id=\"lone\"></i>",
            None,
        );
        let inner = page
            .root()
            .select_first(&Selector::parse("#inner").unwrap())
            .unwrap();
        assert!(inner.has_ancestor_with_class("outer"));
        assert!(!inner.has_ancestor_with_class("missing"));

        let lone = page
            .root()
            .select_first(&Selector::parse("#lone").unwrap())
            .unwrap();
        assert!(!lone.has_ancestor_with_class("outer"));
    }

    #[test]
    fn test_resolve_href() {
        let base = Url::parse("https://canvas.example.edu/courses/9001/modules").unwrap();
        assert_eq!(
            resolve_href("/courses/9001/modules/items/5", Some(&base)),
            "https://canvas.example.edu/courses/9001/modules/items/5"
        );
        assert_eq!(resolve_href("/a", None), "/a");
    }

    #[test]
    fn test_document_title() {
        let page = Page::parse(
            "<html><head><title>Modules: Biology 101</title></head><body></body></html>",
            None,
        );
        assert_eq!(page.document_title().as_deref(), Some("Modules: Biology 101"));
    }
}
