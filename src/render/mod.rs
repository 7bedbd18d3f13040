//! Human-readable tree exports of a [`Hierarchy`]

pub mod html;
pub mod markdown;

pub use html::render as to_html;
pub use markdown::render as to_markdown;

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{Hierarchy, Item, Module, Section};

static DAY_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^Day\s+\d+$").unwrap());

/// Suffix used in export file names
pub const FILE_SUFFIX: &str = "ModulesTree";

/// Page facts that are not part of the hierarchy itself
#[derive(Debug, Clone)]
pub struct TreeContext {
    pub current_user: String,
}

/// Whether a section reads as a day of the course ("Day 3")
pub fn is_day_section(title: &str) -> bool {
    DAY_TITLE.is_match(title.trim())
}

/// How one module appears in the tree
pub(crate) enum ModuleBody<'a> {
    Items(&'a [Item]),
    Sections(Vec<&'a Section>),
}

/// Sections replace the flat item list whenever a module has any
pub(crate) fn module_body<'a>(hierarchy: &'a Hierarchy, module: &'a Module) -> ModuleBody<'a> {
    let sections: Vec<&Section> = hierarchy.sections_of(module).collect();
    if sections.is_empty() {
        ModuleBody::Items(&module.items)
    } else {
        ModuleBody::Sections(sections)
    }
}

/// Heading text of a section, numbered unless it is a day
pub(crate) fn section_heading(module_number: usize, section_number: usize, title: &str) -> String {
    if is_day_section(title) {
        format!("🗓️ {title}")
    } else {
        format!("{module_number}.{section_number}. {title}")
    }
}

/// Fixture shared by the renderer tests
#[cfg(test)]
pub(crate) fn sample_hierarchy() -> Hierarchy {
    use crate::model::{DownloadInfo, ItemType};

    let item = |id: &str, title: &str, url: &str, item_type: ItemType| Item {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        item_type,
        download_info: (item_type == ItemType::File).then(|| DownloadInfo::new("9001", id)),
    };
    let slides = item("1", "Slides", "https://c.example/items/1", ItemType::File);
    let essay = item("2", "Essay <draft>", "", ItemType::Assignment);
    let quiz = item("3", "Quiz 1", "https://c.example/items/3", ItemType::Quiz);

    let mut hierarchy = Hierarchy::new("9001", "BIO 101");
    hierarchy.modules = vec![
        Module {
            id: "10".to_string(),
            title: "Week 1".to_string(),
            items: vec![slides.clone(), essay.clone()],
            attachments: vec![slides.clone()],
        },
        Module {
            id: "11".to_string(),
            title: "Week 2".to_string(),
            items: vec![quiz.clone()],
            attachments: vec![],
        },
    ];
    hierarchy.sections = vec![
        Section {
            id: "s1".to_string(),
            title: "day 1".to_string(),
            module_id: "10".to_string(),
            module_title: "Week 1".to_string(),
            items: vec![slides.clone()],
            attachments: vec![slides.clone()],
        },
        Section {
            id: "s2".to_string(),
            title: "Reading".to_string(),
            module_id: "10".to_string(),
            module_title: "Week 1".to_string(),
            items: vec![],
            attachments: vec![],
        },
    ];
    hierarchy.all_items = vec![slides.clone(), essay, quiz];
    hierarchy.all_attachments = vec![slides];
    hierarchy
}
