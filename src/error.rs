use thiserror::Error;

/// Why a single element was left out of the hierarchy
///
/// These never abort an extraction pass; the builder logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("item {id:?} has no title")]
    MissingTitle { id: String },

    #[error("module {id:?} has no title")]
    MissingModuleTitle { id: String },

    #[error("module {title:?} has no items")]
    EmptyModule { title: String },

    #[error("no attachment_<id> marker in class {class:?}")]
    MalformedAttachmentMarker { class: String },

    #[error("sub-header {id:?} is nested inside another item")]
    NestedSubHeader { id: String },
}

/// Failures outside the extraction core
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not extract course id from {0}")]
    MissingCourseId(String),

    #[error("capability {0} is disabled")]
    CapabilityDisabled(&'static str),

    #[error("no module or section matches {0}")]
    UnknownScope(String),

    #[error("{key} matches {count} entries with ids {ids}; select one by id")]
    AmbiguousScope {
        key: String,
        count: usize,
        ids: String,
    },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("WebDriver session could not be created: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
