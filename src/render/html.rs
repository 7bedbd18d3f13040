use crate::model::{Hierarchy, Item};
use crate::render::{ModuleBody, TreeContext, is_day_section, module_body, section_heading};

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; margin: 20px; color: #333; }
    h1 { color: #0057a0; border-bottom: 2px solid #0057a0; padding-bottom: 10px; }
    h2 { color: #0057a0; margin-top: 20px; border-bottom: 1px solid #ccc; padding-bottom: 5px; }
    h3 {
      color: #555; margin-top: 15px; margin-left: 20px; background-color: #f5f5f5;
      padding: 5px 10px; border-left: 3px solid #0057a0; font-size: 1.2em;
    }
    .day-header {
      font-weight: bold; color: rgb(32, 54, 255); font-size: 1.2em; margin: 15px 0 10px 25px;
      padding-left: 5px; border-bottom: 1px dashed rgb(92, 49, 245); display: inline-block;
    }
    .metadata { background-color: #f5f5f5; padding: 10px; border-radius: 5px; margin-bottom: 20px; }
    .metadata p { margin: 5px 0; }
    .module-item { margin: 8px 0 8px 40px; }
    .section-item { margin: 8px 0 8px 60px; }
    .item-type { font-weight: bold; color: #555; }
    hr { border: 0; height: 1px; background: #ddd; margin: 20px 0; }
    a { color: #0057a0; text-decoration: none; }
    a:hover { text-decoration: underline; }
    .user-subtitle { font-size: 0.85em; color: #666; font-style: italic; margin-left: 5px; }
    @media print {
      body { font-size: 12pt; }
      h1 { font-size: 18pt; }
      h2 { font-size: 16pt; }
      h3 { font-size: 14pt; }
      .day-header { font-size: 13pt; color: rgb(103, 59, 169); }
    }
"#;

/// Print-ready HTML page of the course structure
///
/// Text and link targets are escaped; open the result in a browser and
/// print it to get the PDF tree.
pub fn render(hierarchy: &Hierarchy, ctx: &TreeContext) -> String {
    let course = escape(&hierarchy.course_name);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("  <title>{course} - Modules Structure</title>\n"));
    html.push_str(&format!("  <style>{STYLE}  </style>\n</head>\n<body>\n"));
    html.push_str(&format!("  <h1>{course} - Modules Structure</h1>\n"));
    html.push_str("  <div class=\"metadata\">\n");
    html.push_str(&format!(
        "    <p><strong>Course ID:</strong> {}</p>\n",
        escape(&hierarchy.course_id)
    ));
    html.push_str(&format!(
        "    <p><strong>Current User's Login:</strong> {} <span class=\"user-subtitle\">- Canvas Student Account</span></p>\n",
        escape(&ctx.current_user)
    ));
    html.push_str(&format!(
        "    <p><strong>Total Items:</strong> {}</p>\n",
        hierarchy.all_items.len()
    ));
    html.push_str(&format!(
        "    <p><strong>Total Files:</strong> {}</p>\n",
        hierarchy.all_attachments.len()
    ));
    html.push_str(&format!(
        "    <p><strong>Total Modules:</strong> {}</p>\n",
        hierarchy.modules.len()
    ));
    html.push_str("  </div>\n");

    for (module_index, module) in hierarchy.modules.iter().enumerate() {
        let module_number = module_index + 1;
        html.push_str(&format!(
            "  <h2>{}. {}</h2>\n",
            module_number,
            escape(&module.title)
        ));

        match module_body(hierarchy, module) {
            ModuleBody::Items(items) => write_items(&mut html, items, "module"),
            ModuleBody::Sections(sections) => {
                for (section_index, section) in sections.iter().enumerate() {
                    let heading = escape(&section_heading(
                        module_number,
                        section_index + 1,
                        &section.title,
                    ));
                    if is_day_section(&section.title) {
                        html.push_str(&format!("  <div class=\"day-header\">{heading}</div>\n"));
                    } else {
                        html.push_str(&format!("  <h3>{heading}</h3>\n"));
                    }
                    write_items(&mut html, &section.items, "section");
                }
            }
        }

        html.push_str("  <hr>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn write_items(html: &mut String, items: &[Item], container: &str) {
    if items.is_empty() {
        html.push_str(&format!(
            "  <div class=\"{container}-item\"><em>No items in this {container}</em></div>\n"
        ));
        return;
    }
    for item in items {
        let title = escape(&item.title);
        let link = if item.url.is_empty() {
            title
        } else {
            format!(
                "<a href=\"{}\" target=\"_blank\">{}</a>",
                escape(&item.url),
                title
            )
        };
        html.push_str(&format!(
            "  <div class=\"{}-item\">{} <span class=\"item-type\">{}:</span> {}</div>\n",
            container,
            item.item_type.icon(),
            item.item_type.as_str().to_uppercase(),
            link
        ));
    }
}

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
