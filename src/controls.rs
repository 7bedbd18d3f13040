use serde::Serialize;

use crate::config::{Capabilities, Capability};
use crate::model::Hierarchy;

/// What a control acts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    AllAttachments,
    MarkdownTree,
    PdfTree,
    Module { id: String },
    Section { id: String },
    Item { id: String },
}

/// One affordance offered next to the modules page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub capability: Capability,
    pub target: Target,
    pub label: String,
    pub tooltip: String,
}

impl Control {
    fn new(capability: Capability, target: Target, label: String, tooltip: String) -> Self {
        Self {
            capability,
            target,
            label,
            tooltip,
        }
    }
}

/// Controls for a hierarchy in the order they are placed on the page
///
/// Global download first, then the tree exports, then one control per
/// module, section and attachment that has something to download.
pub fn plan(hierarchy: &Hierarchy, capabilities: &Capabilities) -> Vec<Control> {
    let mut controls = Vec::new();

    if capabilities.is_enabled(Capability::GlobalDownload) {
        controls.push(Control::new(
            Capability::GlobalDownload,
            Target::AllAttachments,
            format!("📥 Download All ({})", hierarchy.all_attachments.len()),
            format!("Download every attachment of {}", hierarchy.course_name),
        ));
    }

    if capabilities.is_enabled(Capability::MarkdownTree) {
        controls.push(Control::new(
            Capability::MarkdownTree,
            Target::MarkdownTree,
            "🌳 MD Tree".to_string(),
            "Download course structure as Markdown with links".to_string(),
        ));
    }

    if capabilities.is_enabled(Capability::PdfTree) {
        controls.push(Control::new(
            Capability::PdfTree,
            Target::PdfTree,
            "📄 PDF Tree".to_string(),
            "Download course structure as PDF".to_string(),
        ));
    }

    if capabilities.is_enabled(Capability::ModuleDownload) {
        for module in hierarchy.modules.iter().filter(|m| !m.attachments.is_empty()) {
            controls.push(Control::new(
                Capability::ModuleDownload,
                Target::Module {
                    id: module.id.clone(),
                },
                format!("📥 Download Module ({})", module.attachments.len()),
                format!("Download all attachments in {}", module.title),
            ));
        }
    }

    if capabilities.is_enabled(Capability::SectionDownload) {
        for section in hierarchy.sections.iter().filter(|s| !s.attachments.is_empty()) {
            controls.push(Control::new(
                Capability::SectionDownload,
                Target::Section {
                    id: section.id.clone(),
                },
                format!("📥 Section ({})", section.attachments.len()),
                format!("Download all attachments in section \"{}\"", section.title),
            ));
        }
    }

    if capabilities.is_enabled(Capability::ItemDownload) {
        for attachment in &hierarchy.all_attachments {
            controls.push(Control::new(
                Capability::ItemDownload,
                Target::Item {
                    id: attachment.id.clone(),
                },
                "📥 Download".to_string(),
                "Direct Download".to_string(),
            ));
        }
    }

    controls
}
