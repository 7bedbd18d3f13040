use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// Convert a course name to a filename-safe string
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS
        .replace_all(name, "_")
        .trim()
        .to_string()
}

/// `2024-03-05_14-07-09`, used in export file names
pub fn format_file_datetime(time: &NaiveDateTime) -> String {
    time.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// `<course>_<suffix>_<timestamp><extension>`
pub fn export_file_name(
    course_name: &str,
    suffix: &str,
    extension: &str,
    time: &NaiveDateTime,
) -> String {
    format!(
        "{}_{}_{}{}",
        sanitize_filename(course_name),
        suffix,
        format_file_datetime(time),
        extension
    )
}

/// Export file name stamped with the local time
pub fn export_file_name_now(course_name: &str, suffix: &str, extension: &str) -> String {
    export_file_name(course_name, suffix, extension, &Local::now().naive_local())
}
