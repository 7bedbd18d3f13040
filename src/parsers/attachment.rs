use regex::Regex;
use std::sync::LazyLock;

use crate::dom::DomNode;
use crate::error::Skip;
use crate::model::DownloadInfo;

static ATTACHMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)attachment_(\d+)").unwrap());

/// File id from an item's class string (`attachment_48213` -> `48213`)
pub fn file_id(class_string: &str) -> Option<&str> {
    ATTACHMENT_MARKER
        .captures(class_string)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Download descriptor for an item, if it is a downloadable file
///
/// The `attachment_<digits>` class marker is the only evidence accepted;
/// the download URL is derived from the ids without any request.
pub fn resolve<N: DomNode>(node: &N, course_id: &str) -> Result<DownloadInfo, Skip> {
    let class_string = node.class_string();
    match file_id(class_string) {
        Some(id) => Ok(DownloadInfo::new(course_id, id)),
        None => Err(Skip::MalformedAttachmentMarker {
            class: class_string.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Page;
    use scraper::Selector;

    fn resolve_html(html: &str, course_id: &str) -> Result<DownloadInfo, Skip> {
        let page = Page::parse(html, None);
        let selector = Selector::parse("li").unwrap();
        let node = page.root().select_first(&selector).unwrap();
        resolve(&node, course_id)
    }

    #[test]
    fn test_resolves_download_url() {
        let info = resolve_html(
            r#"<ul><li class="context_module_item attachment attachment_48213"></li></ul>"#,
            "9001",
        )
        .unwrap();
        assert_eq!(info.file_id, "48213");
        assert_eq!(
            info.download_url,
            "/courses/9001/files/48213/download?download_frd=1"
        );
        assert!(info.can_download);
    }

    #[test]
    fn test_marker_without_digits() {
        let result = resolve_html(r#"<ul><li class="attachment attachment_"></li></ul>"#, "9001");
        assert_eq!(
            result,
            Err(Skip::MalformedAttachmentMarker {
                class: "attachment attachment_".to_string()
            })
        );
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        assert_eq!(file_id("item Attachment_77 attachment"), Some("77"));
        assert_eq!(file_id("attachment"), None);
    }
}
