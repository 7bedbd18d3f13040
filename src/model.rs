use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of a module item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    File,
    Assignment,
    Quiz,
    Discussion,
    Link,
    ExternalTool,
    Page,
    Unknown,
}

impl ItemType {
    /// Tag as it appears in exports (`external-tool`, `file`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::File => "file",
            ItemType::Assignment => "assignment",
            ItemType::Quiz => "quiz",
            ItemType::Discussion => "discussion",
            ItemType::Link => "link",
            ItemType::ExternalTool => "external-tool",
            ItemType::Page => "page",
            ItemType::Unknown => "unknown",
        }
    }

    /// Icon shown next to the item in tree exports
    pub fn icon(&self) -> &'static str {
        match self {
            ItemType::File => "📄",
            ItemType::Assignment => "📝",
            ItemType::Quiz => "❓",
            ItemType::Discussion => "💬",
            ItemType::Page => "📄",
            ItemType::Link => "🔗",
            ItemType::ExternalTool => "🧰",
            ItemType::Unknown => "📎",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download descriptor of a file attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    /// Numeric file identifier taken from the `attachment_<digits>` class
    pub file_id: String,

    /// Same-origin path that forces the file download
    pub download_url: String,

    pub can_download: bool,
}

impl DownloadInfo {
    /// Derive the descriptor for `file_id` within `course_id`
    pub fn new(course_id: &str, file_id: &str) -> Self {
        Self {
            file_id: file_id.to_string(),
            download_url: download_url(course_id, file_id),
            can_download: true,
        }
    }
}

/// `/courses/{courseId}/files/{fileId}/download?download_frd=1`
pub fn download_url(course_id: &str, file_id: &str) -> String {
    format!("/courses/{course_id}/files/{file_id}/download?download_frd=1")
}

/// A single module entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,

    pub title: String,

    /// Absolute link to the item, empty when the item has none
    pub url: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Present only for `ItemType::File`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_info: Option<DownloadInfo>,
}

impl Item {
    /// Whether this item is a resolved, downloadable attachment
    pub fn is_attachment(&self) -> bool {
        self.download_info
            .as_ref()
            .is_some_and(|info| info.can_download)
    }
}

/// An ordered container of items as rendered on the modules page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    pub items: Vec<Item>,
    pub attachments: Vec<Item>,
}

impl Module {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.attachments.is_empty()
    }
}

/// Items of a module between one sub-header and the next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub module_id: String,
    pub module_title: String,
    pub items: Vec<Item>,
    pub attachments: Vec<Item>,
}

/// Everything one extraction pass produces for a course page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hierarchy {
    pub course_id: String,
    pub course_name: String,
    pub modules: Vec<Module>,
    pub sections: Vec<Section>,
    pub all_items: Vec<Item>,
    pub all_attachments: Vec<Item>,
}

impl Hierarchy {
    /// Create an empty hierarchy for a course
    pub fn new(course_id: impl Into<String>, course_name: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            ..Self::default()
        }
    }

    /// Sections that belong to the given module, in page order
    pub fn sections_of<'a>(&'a self, module: &'a Module) -> impl Iterator<Item = &'a Section> {
        self.sections
            .iter()
            .filter(move |section| section.module_id == module.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_is_derived_from_ids() {
        let info = DownloadInfo::new("9001", "48213");
        assert_eq!(
            info.download_url,
            "/courses/9001/files/48213/download?download_frd=1"
        );
        assert!(info.can_download);
    }

    #[test]
    fn test_item_type_serializes_as_tag() {
        let json = serde_json::to_string(&ItemType::ExternalTool).unwrap();
        assert_eq!(json, "\"external-tool\"");
        assert_eq!(ItemType::Discussion.to_string(), "discussion");
    }

    #[test]
    fn test_item_json_uses_type_key() {
        let item = Item {
            id: "7".to_string(),
            title: "Syllabus".to_string(),
            url: String::new(),
            item_type: ItemType::Page,
            download_info: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "page");
        assert!(value.get("downloadInfo").is_none());
    }
}
