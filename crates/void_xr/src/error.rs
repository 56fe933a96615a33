//! XR platform errors

use thiserror::Error;

/// Errors raised by the XR platform during session setup and teardown.
///
/// Nothing in the per-frame path returns these; missing frame data is
/// represented with `Option` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XrError {
    /// The platform cannot provide an immersive AR session
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// The session request was rejected
    #[error("Session request failed: {0}")]
    SessionRequestFailed(String),

    /// A hit-test source could not be created
    #[error("Hit-test source request failed: {0}")]
    HitTestSourceFailed(String),

    /// The operation needs a running session
    #[error("No running XR session")]
    NoSession,

    /// The session already ended
    #[error("XR session already ended")]
    SessionEnded,
}

/// Result type for XR platform operations
pub type Result<T> = std::result::Result<T, XrError>;
