//! Error taxonomy shared by the acquisition pipeline and its callers.

/// Message returned when a query lacks its required fields.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: keywords, location";

/// All errors that can occur while answering a job search.
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    #[error("Missing required fields: keywords, location")]
    MissingFields,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid skill pattern: {0}")]
    Vocabulary(#[from] regex::Error),
}

impl ScoutError {
    /// Whether the error stems from caller input rather than a downstream failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, ScoutError::MissingFields)
    }
}

/// Failure while acquiring raw job records from the upstream source.
///
/// Every variant is surfaced once; nothing here is retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("selector timeout")]
    SelectorTimeout,

    #[error("Page extraction failed: {0}")]
    Extraction(String),

    #[error("Upstream returned HTTP {0}")]
    Upstream(u16),

    #[error("Request failed: {0}")]
    Request(String),
}
