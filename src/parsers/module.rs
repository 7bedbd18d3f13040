use url::Url;

use crate::dom::DomNode;
use crate::error::Skip;
use crate::model::{Item, ItemType, Module};
use crate::parsers::selectors::{ATTACHMENT_CLASS, MODULE_ID_ATTR, MODULE_ITEM, MODULE_TITLE};
use crate::parsers::{attachment, fields};

/// Per-pass values every item extraction needs
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub course_id: &'a str,

    /// Address of the page, used to make links absolute
    pub base_url: Option<&'a Url>,
}

/// Build an item from a single item node
pub fn extract_item<N: DomNode>(node: &N, ctx: &ExtractContext<'_>) -> Result<Item, Skip> {
    let id = fields::item_id(node);
    let title =
        fields::extract_title(node).ok_or_else(|| Skip::MissingTitle { id: id.clone() })?;
    let url = fields::extract_url(node, ctx.base_url);
    let mut item_type = fields::extract_type(node);

    let download_info = if node.has_class(ATTACHMENT_CLASS) {
        match attachment::resolve(node, ctx.course_id) {
            Ok(info) => Some(info),
            Err(reason) => {
                ::log::debug!("Item {:?} kept as a non-file item: {}", title, reason);
                None
            }
        }
    } else {
        None
    };

    if item_type == ItemType::File && download_info.is_none() {
        item_type = fields::extract_non_file_type(node);
    }

    Ok(Item {
        id,
        title,
        url,
        item_type,
        download_info,
    })
}

/// Extract items from `nodes`, returning them with their attachment subset
///
/// Nodes that fail extraction are logged and left out.
pub fn collect_items<'n, N, I>(
    nodes: I,
    ctx: &ExtractContext<'_>,
    scope: &str,
) -> (Vec<Item>, Vec<Item>)
where
    N: DomNode + 'n,
    I: IntoIterator<Item = &'n N>,
{
    let mut items = Vec::new();
    let mut attachments = Vec::new();

    for node in nodes {
        match extract_item(node, ctx) {
            Ok(item) => {
                if item.is_attachment() {
                    attachments.push(item.clone());
                }
                items.push(item);
            }
            Err(reason) => ::log::debug!("Skipping item in {}: {}", scope, reason),
        }
    }

    (items, attachments)
}

/// Build a module from a `.context_module` node
///
/// Returns `Skip::MissingModuleTitle` when the module header is absent or
/// blank. An empty module is still returned; dropping it is the builder's job.
pub fn extract_module<N: DomNode>(node: &N, ctx: &ExtractContext<'_>) -> Result<Module, Skip> {
    let id = node.attr(MODULE_ID_ATTR).unwrap_or("").to_string();
    let title = node
        .select_first(&MODULE_TITLE)
        .map(|title_node| title_node.text())
        .filter(|title| !title.is_empty())
        .ok_or_else(|| Skip::MissingModuleTitle { id: id.clone() })?;

    let candidates = node.select_all(&MODULE_ITEM);
    let (items, attachments) = collect_items(&candidates, ctx, &format!("module {title:?}"));

    ::log::trace!(
        "Module {:?} ({}): {} items, {} attachments",
        title,
        id,
        items.len(),
        attachments.len()
    );

    Ok(Module {
        id,
        title,
        items,
        attachments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Page;
    use scraper::Selector;

    const COURSE: &str = "9001";

    fn first_module(page: &Page) -> scraper::ElementRef<'_> {
        let selector = Selector::parse(".context_module").unwrap();
        page.root().select_first(&selector).unwrap()
    }

    fn ctx() -> ExtractContext<'static> {
        ExtractContext {
            course_id: COURSE,
            base_url: None,
        }
    }

    #[test]
    fn test_module_items_and_attachments() {
        let page = Page::parse(
            r#"<div class="context_module" data-module-id="31">
                <div class="ig-header-title"><span class="name">Week 1</span></div>
                <ul>
                  <li id="context_module_item_1" class="context_module_item attachment attachment_500">
                    <a class="ig-title" href="/courses/9001/modules/items/1">slides.pdf</a>
                  </li>
                  <li id="context_module_item_2" class="context_module_item context_module_sub_header">
                    <span class="title">Day 1</span>
                  </li>
                  <li id="context_module_item_3" class="context_module_item assignment">
                    <a class="ig-title" href="/courses/9001/assignments/8">Essay</a>
                  </li>
                  <li id="context_module_item_4" class="context_module_item"></li>
                </ul>
            </div>"#,
            None,
        );
        let module = extract_module(&first_module(&page), &ctx()).unwrap();

        assert_eq!(module.id, "31");
        assert_eq!(module.title, "Week 1");
        let titles: Vec<&str> = module.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["slides.pdf", "Essay"]);
        assert_eq!(module.items[0].id, "1");
        assert_eq!(module.items[0].item_type, ItemType::File);
        assert_eq!(module.attachments, vec![module.items[0].clone()]);
        assert_eq!(module.items[1].item_type, ItemType::Assignment);
        assert!(module.items[1].download_info.is_none());
    }

    #[test]
    fn test_unresolvable_attachment_is_kept_as_non_file() {
        let page = Page::parse(
            r#"<div class="context_module">
                <div class="ig-header-title"><span class="name">M</span></div>
                <div class="context_module_item attachment attachment_">
                  <span class="ig-title">Broken</span><i class="icon-document"></i>
                </div>
            </div>"#,
            None,
        );
        let module = extract_module(&first_module(&page), &ctx()).unwrap();
        assert_eq!(module.items.len(), 1);
        assert_eq!(module.items[0].item_type, ItemType::Page);
        assert!(module.items[0].download_info.is_none());
        assert!(module.attachments.is_empty());
    }

    #[test]
    fn test_module_without_title() {
        let page = Page::parse(
            r#"<div class="context_module" data-module-id="9">
                <div class="context_module_item"><span class="ig-title">x</span></div>
            </div>"#,
            None,
        );
        assert_eq!(
            extract_module(&first_module(&page), &ctx()),
            Err(Skip::MissingModuleTitle { id: "9".to_string() })
        );
    }

    #[test]
    fn test_module_with_blank_title() {
        let page = Page::parse(
            r#"<div class="context_module" data-module-id="12">
                <div class="ig-header-title"><span class="name">   </span></div>
                <div class="context_module_item"><span class="ig-title">X1</span></div>
            </div>"#,
            None,
        );
        assert_eq!(
            extract_module(&first_module(&page), &ctx()),
            Err(Skip::MissingModuleTitle { id: "12".to_string() })
        );
    }

    #[test]
    fn test_empty_module_is_returned() {
        let page = Page::parse(
            r#"<div class="context_module">
                <div class="ig-header-title"><span class="name">Admin</span></div>
            </div>"#,
            None,
        );
        let module = extract_module(&first_module(&page), &ctx()).unwrap();
        assert!(module.is_empty());
        assert_eq!(module.id, "");
    }
}
