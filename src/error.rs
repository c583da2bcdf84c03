use std::error::Error as StdError;

use thiserror::Error;

/// Tubeside's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Tubeside's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
///
/// The variants mirror the engine's failure taxonomy:
/// - `Timeout`: a structural marker never appeared; the sync cycle is aborted.
/// - `UserActionRequired`: a user-initiated action can't proceed without user input
///   (e.g. summarize with no destination configured).
/// - `External`: an outbound operation (clipboard write, destination open) failed.
///
/// "Transcript unavailable" is *not* an error — extraction returns an empty snapshot,
/// since absence is an expected, common state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("timed out waiting for element: {selector}")]
    Timeout { selector: String },

    #[error("{0}")]
    UserActionRequired(String),

    #[error("external operation failed: {0}")]
    External(String),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Whether this error asks the user to do something, as opposed to an
    /// internal or environmental failure.
    pub fn is_user_action_required(&self) -> bool {
        matches!(self, Self::UserActionRequired(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}
