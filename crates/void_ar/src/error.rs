//! Error types for AR placement

use thiserror::Error;
use void_xr::XrError;

/// AR placement errors
///
/// Per-frame conditions (no hit this frame, unresolved poses, ambiguous
/// surfaces) are never reported here; they are absorbed where they occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArError {
    /// An operation was called before the session was entered
    #[error("AR session not initialized: {0}")]
    NotInitialized(&'static str),

    /// An operation is not valid in the current session state
    #[error("Invalid AR session state: {0}")]
    InvalidState(String),

    /// The platform cannot run an AR session
    #[error("AR is not available on this platform")]
    Unavailable,

    /// Session setup failed on the platform side
    #[error("XR platform error: {0}")]
    Xr(#[from] XrError),

    /// Configuration rejected by validation
    #[error("Invalid AR configuration: {0}")]
    InvalidConfig(String),

    /// A model URL could not be turned into a launch URL
    #[error("Invalid model URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No AR backend in the priority list can handle the request
    #[error("No AR backend available")]
    NoBackendAvailable,
}

impl ArError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            ArError::NotInitialized(_) => "not-initialized",
            ArError::InvalidState(_) => "invalid-state",
            ArError::Unavailable => "unavailable",
            ArError::Xr(_) => "xr-platform",
            ArError::InvalidConfig(_) => "invalid-config",
            ArError::InvalidUrl(_) => "invalid-url",
            ArError::NoBackendAvailable => "no-backend",
        }
    }
}

/// Result type for AR operations
pub type Result<T> = std::result::Result<T, ArError>;
