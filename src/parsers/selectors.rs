//! Canvas modules page markup

use scraper::Selector;
use std::sync::LazyLock;

use crate::model::ItemType;

pub const MODULE_ID_ATTR: &str = "data-module-id";
pub const ITEM_CLASS: &str = "context_module_item";
pub const ITEM_ID_PREFIX: &str = "context_module_item_";
pub const SUB_HEADER_CLASS: &str = "context_module_sub_header";
pub const ATTACHMENT_CLASS: &str = "attachment";
pub const EXTERNAL_URL_CLASSES: [&str; 2] = ["external_url", "external-url"];
pub const UNTITLED_SECTION: &str = "Untitled Section";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

pub static MODULE: LazyLock<Selector> = LazyLock::new(|| selector(".context_module"));
pub static MODULE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector(".ig-header-title .name"));

/// Content items only; sub-headers are excluded
pub static MODULE_ITEM: LazyLock<Selector> =
    LazyLock::new(|| selector(".context_module_item:not(.context_module_sub_header)"));

/// Every item-level node, sub-headers included
pub static ANY_MODULE_ITEM: LazyLock<Selector> =
    LazyLock::new(|| selector(".context_module_item"));

pub static ITEM_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".ig-title"));
pub static ITEM_TITLE_ALT: LazyLock<Selector> = LazyLock::new(|| selector(".title"));
pub static ITEM_TITLE_MODULE: LazyLock<Selector> =
    LazyLock::new(|| selector(".module-item-title .item_name"));
pub static TITLE_ATTR: LazyLock<Selector> =
    LazyLock::new(|| selector("[title]:not([title=\"\"])"));

pub static ITEM_LINK: LazyLock<Selector> = LazyLock::new(|| {
    selector("a.title, a.ig-title, .module-item-title a.item_link")
});
pub static EXTERNAL_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector("a[href]:not([href=\"#\"])"));

pub static TYPE_LABEL: LazyLock<Selector> = LazyLock::new(|| selector("span.type"));

/// Section title inside a sub-header
pub static SECTION_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".title"));

/// Item classes in the order they are checked
pub const TYPE_CLASSES: [(&str, ItemType); 8] = [
    ("attachment", ItemType::File),
    ("assignment", ItemType::Assignment),
    ("quiz", ItemType::Quiz),
    ("discussion-topic", ItemType::Discussion),
    ("external-url", ItemType::Link),
    ("external_url", ItemType::Link),
    ("external-tool", ItemType::ExternalTool),
    ("wiki-page", ItemType::Page),
];

/// Icon markers in the order they are checked
pub static TYPE_ICONS: LazyLock<Vec<(Selector, ItemType)>> = LazyLock::new(|| {
    vec![
        (selector(".icon-assignment"), ItemType::Assignment),
        (selector(".icon-quiz"), ItemType::Quiz),
        (selector(".icon-discussion"), ItemType::Discussion),
        (selector(".icon-document"), ItemType::Page),
        (selector(".icon-link"), ItemType::Link),
    ]
});

pub static BREADCRUMB_COURSE: LazyLock<Selector> =
    LazyLock::new(|| selector(".ic-app-crumbs li:not(.home) a span.ellipsible"));
pub static ELLIPSIBLE: LazyLock<Selector> = LazyLock::new(|| selector("span.ellipsible"));
pub static BREADCRUMB_SIMPLE: LazyLock<Selector> =
    LazyLock::new(|| selector(".ic-app-crumbs .home + a"));
pub static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".page-title"));
pub static USER_PROFILE: LazyLock<Selector> =
    LazyLock::new(|| selector("#global_nav_profile_link .menu-item__text"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selectors_parse() {
        let all: [&LazyLock<Selector>; 17] = [
            &MODULE,
            &MODULE_TITLE,
            &MODULE_ITEM,
            &ANY_MODULE_ITEM,
            &ITEM_TITLE,
            &ITEM_TITLE_ALT,
            &ITEM_TITLE_MODULE,
            &TITLE_ATTR,
            &ITEM_LINK,
            &EXTERNAL_LINK,
            &TYPE_LABEL,
            &SECTION_TITLE,
            &BREADCRUMB_COURSE,
            &ELLIPSIBLE,
            &BREADCRUMB_SIMPLE,
            &PAGE_TITLE,
            &USER_PROFILE,
        ];
        for selector in all {
            LazyLock::force(selector);
        }
        assert_eq!(TYPE_ICONS.len(), 5);
    }
}
