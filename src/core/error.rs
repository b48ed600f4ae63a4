use crate::core::Capability;
use thiserror::Error;

pub type Result<T, E = ExtractionError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// URL or id does not match the grammar of the factory that was asked.
    #[error("parsing error: {0}")]
    Parsing(String),

    /// Registry wiring is inconsistent (duplicate kiosk, missing default).
    #[error("extraction setup error: {0}")]
    Setup(String),

    #[error("{0} is not supported by this service")]
    Unsupported(Capability),

    #[error("no kiosk with id {0:?}")]
    KioskNotFound(String),

    #[error("content not available: {0}")]
    ContentNotAvailable(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed feed: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),
}

impl ExtractionError {
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing(message.into())
    }

    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup(message.into())
    }

    /// Errors a caller can recover from by trying another service or
    /// showing "unsupported" instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Setup(_))
    }
}
