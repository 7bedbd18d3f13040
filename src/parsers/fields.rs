use url::Url;

use crate::dom::{DomNode, resolve_href};
use crate::model::ItemType;
use crate::parsers::selectors::{
    EXTERNAL_LINK, EXTERNAL_URL_CLASSES, ITEM_ID_PREFIX, ITEM_LINK, ITEM_TITLE, ITEM_TITLE_ALT,
    ITEM_TITLE_MODULE, TITLE_ATTR, TYPE_CLASSES, TYPE_ICONS, TYPE_LABEL,
};

/// Item id with the host's `context_module_item_` prefix removed
pub fn item_id<N: DomNode>(node: &N) -> String {
    let raw = node.node_id().unwrap_or("");
    raw.strip_prefix(ITEM_ID_PREFIX).unwrap_or(raw).to_string()
}

/// Title of an item, or `None` when the item cannot be represented
///
/// Tries `.ig-title`, `.title`, `.module-item-title .item_name`, then the
/// first non-empty `title` attribute in the subtree. The first non-empty
/// value wins.
pub fn extract_title<N: DomNode>(node: &N) -> Option<String> {
    [&*ITEM_TITLE, &*ITEM_TITLE_ALT, &*ITEM_TITLE_MODULE]
        .into_iter()
        .filter_map(|selector| node.select_first(selector))
        .map(|title_node| title_node.text())
        .find(|title| !title.is_empty())
        .or_else(|| title_attribute(node))
}

fn title_attribute<N: DomNode>(node: &N) -> Option<String> {
    node.select_all(&TITLE_ATTR)
        .iter()
        .filter_map(|candidate| candidate.attr("title"))
        .map(str::trim)
        .find(|title| !title.is_empty())
        .map(str::to_string)
}

/// Link of an item, empty when it has none
///
/// Structural link shapes are preferred; the generic anchor fallback only
/// applies to external-URL items so page chrome is never picked up.
pub fn extract_url<N: DomNode>(node: &N, base: Option<&Url>) -> String {
    let structural = node
        .select_first(&ITEM_LINK)
        .and_then(|link| link.attr("href").map(str::trim).map(str::to_string))
        .filter(|href| !href.is_empty());
    if let Some(href) = structural {
        return resolve_href(&href, base);
    }

    if is_external_url(node) {
        let external = node
            .select_first(&EXTERNAL_LINK)
            .and_then(|link| link.attr("href").map(str::trim).map(str::to_string))
            .filter(|href| !href.is_empty());
        if let Some(href) = external {
            return resolve_href(&href, base);
        }
    }

    String::new()
}

fn is_external_url<N: DomNode>(node: &N) -> bool {
    EXTERNAL_URL_CLASSES
        .iter()
        .any(|class| node.has_class(class))
}

/// Classify an item by its marker classes, type label, then icons
pub fn extract_type<N: DomNode>(node: &N) -> ItemType {
    classify(node, true)
}

/// Classification without the `attachment` class tier
///
/// Used for attachment-marked items whose file id could not be resolved;
/// such items must not end up typed as files.
pub fn extract_non_file_type<N: DomNode>(node: &N) -> ItemType {
    classify(node, false)
}

fn classify<N: DomNode>(node: &N, allow_file: bool) -> ItemType {
    let by_class = TYPE_CLASSES
        .iter()
        .filter(|(_, item_type)| allow_file || *item_type != ItemType::File)
        .find(|(class, _)| node.has_class(class))
        .map(|(_, item_type)| *item_type);
    if let Some(item_type) = by_class {
        return item_type;
    }

    let by_label = node
        .select_first(&TYPE_LABEL)
        .and_then(|label| type_from_label(&label.text()));
    if let Some(item_type) = by_label {
        return item_type;
    }

    TYPE_ICONS
        .iter()
        .find(|(icon, _)| node.select_first(icon).is_some())
        .map(|(_, item_type)| *item_type)
        .unwrap_or(ItemType::Unknown)
}

/// Map the host's content-type label to a type tag
pub fn type_from_label(label: &str) -> Option<ItemType> {
    match label {
        "external_url" => Some(ItemType::Link),
        "wiki_page" => Some(ItemType::Page),
        "assignment" => Some(ItemType::Assignment),
        "quiz" => Some(ItemType::Quiz),
        "discussion_topic" => Some(ItemType::Discussion),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Page;
    use scraper::Selector;

    fn with_item<T>(html: &str, f: impl FnOnce(scraper::ElementRef<'_>) -> T) -> T {
        let page = Page::parse(html, None);
        let selector = Selector::parse("li").unwrap();
        let node = page.root().select_first(&selector).unwrap();
        f(node)
    }

    #[test]
    fn test_primary_title_wins_over_secondary() {
        let html = r#"<ul><li>
            <span class="title">Secondary</span>
            <a class="ig-title">Primary</a>
        </li></ul>"#;
        assert_eq!(with_item(html, |n| extract_title(&n)).as_deref(), Some("Primary"));
    }

    #[test]
    fn test_title_fallback_chain() {
        let html = r#"<ul><li><div class="module-item-title"><span class="item_name"> Reading </span></div></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_title(&n)).as_deref(), Some("Reading"));

        let html = r#"<ul><li><span title=""></span><i title="  Lecture 3 "></i></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_title(&n)).as_deref(), Some("Lecture 3"));
    }

    #[test]
    fn test_empty_primary_title_falls_through() {
        let html = r#"<ul><li><span class="ig-title">  </span><span class="title">Notes</span></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_title(&n)).as_deref(), Some("Notes"));
    }

    #[test]
    fn test_missing_title() {
        let html = r#"<ul><li><span class="ig-type">x</span><span title="   "></span></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_title(&n)), None);
    }

    #[test]
    fn test_item_id_prefix_is_stripped() {
        let html = r#"<ul><li id="context_module_item_812"></li></ul>"#;
        assert_eq!(with_item(html, |n| item_id(&n)), "812");
        let html = r#"<ul><li></li></ul>"#;
        assert_eq!(with_item(html, |n| item_id(&n)), "");
    }

    #[test]
    fn test_structural_link_is_resolved() {
        let base = Url::parse("https://canvas.example.edu/courses/9001/modules").unwrap();
        let html = r##"<ul><li class="external_url">
            <a href="#">Menu</a>
            <a class="ig-title" href="/courses/9001/modules/items/4">Item</a>
        </li></ul>"##;
        assert_eq!(
            with_item(html, |n| extract_url(&n, Some(&base))),
            "https://canvas.example.edu/courses/9001/modules/items/4"
        );
    }

    #[test]
    fn test_external_url_fallback() {
        let html = r##"<ul><li class="external_url">
            <a href="#">Menu</a>
            <a href="https://example.org/paper.html">Paper</a>
        </li></ul>"##;
        assert_eq!(
            with_item(html, |n| extract_url(&n, None)),
            "https://example.org/paper.html"
        );

        // Only external-URL items may use the generic anchor
        let html = r#"<ul><li class="wiki-page"><a href="/elsewhere">x</a></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_url(&n, None)), "");
    }

    #[test]
    fn test_class_tier_precedes_icons() {
        let html = r#"<ul><li class="assignment"><i class="icon-quiz"></i></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_type(&n)), ItemType::Assignment);
    }

    #[test]
    fn test_class_priority_order() {
        let html = r#"<ul><li class="wiki-page attachment"></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_type(&n)), ItemType::File);
        let html = r#"<ul><li class="external-tool quiz"></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_type(&n)), ItemType::Quiz);
    }

    #[test]
    fn test_label_tier() {
        let html = r#"<ul><li><span class="type">discussion_topic</span><i class="icon-link"></i></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_type(&n)), ItemType::Discussion);
    }

    #[test]
    fn test_unknown_label_falls_through_to_icons() {
        let html = r#"<ul><li><span class="type">context_module_sub_header</span><i class="icon-document"></i></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_type(&n)), ItemType::Page);
    }

    #[test]
    fn test_icon_priority_and_default() {
        let html = r#"<ul><li><i class="icon-link"></i><i class="icon-discussion"></i></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_type(&n)), ItemType::Discussion);
        let html = r#"<ul><li><i class="icon-video"></i></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_type(&n)), ItemType::Unknown);
    }

    #[test]
    fn test_non_file_type_skips_attachment_class() {
        let html = r#"<ul><li class="attachment"><i class="icon-document"></i></li></ul>"#;
        assert_eq!(with_item(html, |n| extract_type(&n)), ItemType::File);
        assert_eq!(with_item(html, |n| extract_non_file_type(&n)), ItemType::Page);
    }
}
