use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::dom::{DomNode, Page};
use crate::parsers::selectors::{
    BREADCRUMB_COURSE, BREADCRUMB_SIMPLE, ELLIPSIBLE, PAGE_TITLE, USER_PROFILE,
};

static COURSE_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/courses/(\d+)").unwrap());

pub const UNKNOWN_USER: &str = "Unknown User";

/// Course id from the numeric `/courses/<id>` path segment
pub fn course_id(url: &Url) -> Option<String> {
    COURSE_PATH
        .captures(url.path())
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}

/// Human-readable course name, falling back to `default`
///
/// Breadcrumbs are tried first, then the page heading and finally the
/// document title.
pub fn course_name(page: &Page, default: &str) -> String {
    let root = page.root();

    if let Some(crumb) = root.select_first(&BREADCRUMB_COURSE) {
        return DomNode::text(&crumb);
    }

    let ellipsible = root
        .select_all(&ELLIPSIBLE)
        .iter()
        .map(DomNode::text)
        .find(|text| {
            !text.is_empty()
                && !text.contains("My Dashboard")
                && !text.contains("Home")
                && text != "Modules"
        });
    if let Some(name) = ellipsible {
        return name;
    }

    if let Some(crumb) = root.select_first(&BREADCRUMB_SIMPLE) {
        return DomNode::text(&crumb);
    }

    if let Some(heading) = root.select_first(&PAGE_TITLE) {
        if let Some(name) = leading_part(&DomNode::text(&heading), '|') {
            return name;
        }
    }

    page.document_title()
        .and_then(|title| leading_part(&title, ':'))
        .unwrap_or_else(|| default.to_string())
}

/// Text before `separator`, unless it is empty or the generic "Modules"
fn leading_part(text: &str, separator: char) -> Option<String> {
    let part = text.split(separator).next().unwrap_or("").trim();
    if part.is_empty() || part == "Modules" {
        None
    } else {
        Some(part.to_string())
    }
}

/// Display name of the signed-in user
pub fn current_user(page: &Page) -> String {
    page.root()
        .select_first(&USER_PROFILE)
        .map(|el| DomNode::text(&el))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}
