use crate::model::{Hierarchy, Item};
use crate::render::{ModuleBody, TreeContext, module_body, section_heading};

/// Markdown outline of the course with links
pub fn render(hierarchy: &Hierarchy, ctx: &TreeContext) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} - Modules Structure\n\n", hierarchy.course_name));
    md.push_str(&format!("- **Course ID:** {}\n", hierarchy.course_id));
    md.push_str(&format!(
        "- **Current User's Login:** {} *- Canvas Student Account*\n",
        ctx.current_user
    ));
    md.push_str(&format!("- **Total Items:** {}\n", hierarchy.all_items.len()));
    md.push_str(&format!("- **Total Files:** {}\n", hierarchy.all_attachments.len()));
    md.push_str(&format!("- **Total Modules:** {}\n", hierarchy.modules.len()));
    md.push_str("---\n\n");

    for (module_index, module) in hierarchy.modules.iter().enumerate() {
        let module_number = module_index + 1;
        md.push_str(&format!("## {}. {}\n\n", module_number, module.title));

        match module_body(hierarchy, module) {
            ModuleBody::Items(items) => {
                write_items(&mut md, items, "module");
            }
            ModuleBody::Sections(sections) => {
                for (section_index, section) in sections.iter().enumerate() {
                    let heading =
                        section_heading(module_number, section_index + 1, &section.title);
                    md.push_str(&format!("### {heading}\n\n"));
                    write_items(&mut md, &section.items, "section");
                    md.push('\n');
                }
            }
        }

        md.push_str("---\n\n");
    }

    md
}

fn write_items(md: &mut String, items: &[Item], container: &str) {
    if items.is_empty() {
        md.push_str(&format!("- *No items in this {container}*\n"));
        return;
    }
    for item in items {
        let link = if item.url.is_empty() {
            item.title.clone()
        } else {
            format!("[{}]({})", item.title, item.url)
        };
        md.push_str(&format!(
            "- {} **{}:** {}\n",
            item.item_type.icon(),
            item.item_type.as_str().to_uppercase(),
            link
        ));
    }
}
