pub mod attachment;
pub mod course;
pub mod fields;
pub mod module;
pub mod sections;
pub mod selectors;


use url::Url;

use crate::dom::DomNode;
use crate::error::Skip;
use crate::model::Hierarchy;
use module::ExtractContext;

/// Builds a [`Hierarchy`] from a modules page
///
/// Holds only the course identity and page address; every call to
/// [`build`](Self::build) starts from an empty hierarchy.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    course_id: String,
    course_name: String,
    base_url: Option<Url>,
}

impl HierarchyBuilder {
    pub fn new(course_id: impl Into<String>, course_name: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            base_url: None,
        }
    }

    /// Resolve item links against the page address
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Walk every module under `root` and assemble the hierarchy
    ///
    /// Modules without a title or without any items are dropped, as are
    /// items without a title. Nothing here fails the whole pass.
    pub fn build<N: DomNode>(&self, root: &N) -> Hierarchy {
        let ctx = ExtractContext {
            course_id: &self.course_id,
            base_url: self.base_url.as_ref(),
        };
        let mut hierarchy = Hierarchy::new(&self.course_id, &self.course_name);

        let mut kept = Vec::new();
        for node in root.select_all(&selectors::MODULE) {
            let module = match module::extract_module(&node, &ctx) {
                Ok(module) if module.is_empty() => {
                    let reason = Skip::EmptyModule {
                        title: module.title,
                    };
                    ::log::debug!("Dropping module: {}", reason);
                    continue;
                }
                Ok(module) => module,
                Err(reason) => {
                    ::log::debug!("Dropping module: {}", reason);
                    continue;
                }
            };
            hierarchy.all_items.extend(module.items.iter().cloned());
            hierarchy
                .all_attachments
                .extend(module.attachments.iter().cloned());
            kept.push((node, module));
        }

        for (node, module) in &kept {
            hierarchy
                .sections
                .extend(sections::segment(node, module, &ctx));
        }
        hierarchy.modules = kept.into_iter().map(|(_, module)| module).collect();

        ::log::debug!(
            "Extracted {} modules, {} sections, {} items, {} attachments",
            hierarchy.modules.len(),
            hierarchy.sections.len(),
            hierarchy.all_items.len(),
            hierarchy.all_attachments.len()
        );

        hierarchy
    }
}
