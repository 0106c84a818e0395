use thiserror::Error;

/// Errors raised by the ambient parts of the crate: loading configuration,
/// loading a facet catalog, and parsing request inputs such as unit names
/// and reference points.
///
/// Predicate compilation itself never returns an error. Malformed user input
/// degrades to a best-effort predicate instead.
#[derive(Error, Debug, Clone)]
pub enum FacetError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown distance unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

pub type Result<T> = std::result::Result<T, FacetError>;

impl From<std::io::Error> for FacetError {
    fn from(e: std::io::Error) -> Self {
        FacetError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for FacetError {
    fn from(e: serde_json::Error) -> Self {
        FacetError::Json(e.to_string())
    }
}
