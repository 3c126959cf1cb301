//! Error types for compile requests.
//!
//! Copyright (c) 2025 Posit, PBC

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineFailure;

/// Errors that can occur while resolving or running a compile request
#[derive(Debug, Error)]
pub enum SassError {
    /// Missing or conflicting source keywords, or positional arguments
    #[error("{0}")]
    Configuration(String),

    /// A keyword was supplied with the wrong type
    #[error("{0}")]
    TypeMismatch(String),

    /// A keyword had the right type but an unacceptable value
    #[error("{0}")]
    ValueRange(String),

    /// The input file cannot be opened for reading
    #[error("filename '{}' cannot be read", path.display())]
    IoAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The engine reported a failure; the message is the engine's own
    #[error("{message}")]
    Compile { message: String },
}

/// Coarse category of a [`SassError`], for callers that only need to branch
/// on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    TypeMismatch,
    ValueRange,
    IoAccess,
    Compile,
}

impl SassError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SassError::Configuration(_) => ErrorKind::Configuration,
            SassError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            SassError::ValueRange(_) => ErrorKind::ValueRange,
            SassError::IoAccess { .. } => ErrorKind::IoAccess,
            SassError::Compile { .. } => ErrorKind::Compile,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        SassError::Configuration(message.into())
    }

    pub(crate) fn type_mismatch(message: impl Into<String>) -> Self {
        SassError::TypeMismatch(message.into())
    }

    pub(crate) fn value_range(message: impl Into<String>) -> Self {
        SassError::ValueRange(message.into())
    }
}

/// Convert an engine-reported failure into a [`SassError::Compile`].
///
/// Every engine failure collapses into the same variant; the status code is
/// only kept for the log.
pub fn translate_engine_failure(failure: EngineFailure) -> SassError {
    tracing::debug!(status = failure.status, "engine reported failure");
    SassError::Compile {
        message: failure.message,
    }
}

impl From<EngineFailure> for SassError {
    fn from(failure: EngineFailure) -> Self {
        translate_engine_failure(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_failure_message_is_verbatim() {
        let err = translate_engine_failure(EngineFailure::new(1, "Error: expected \"}\"."));
        assert_eq!(err.kind(), ErrorKind::Compile);
        assert_eq!(err.to_string(), "Error: expected \"}\".");
    }

    #[test]
    fn test_status_does_not_change_kind() {
        for status in [1, 2, 3, -1] {
            let err: SassError = EngineFailure::new(status, "boom").into();
            assert!(matches!(err, SassError::Compile { ref message } if message == "boom"));
        }
    }

    #[test]
    fn test_io_access_display() {
        let err = SassError::IoAccess {
            path: PathBuf::from("/nonexistent/path.scss"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        insta::assert_snapshot!(err.to_string(), @"filename '/nonexistent/path.scss' cannot be read");
        assert_eq!(err.kind(), ErrorKind::IoAccess);
        assert!(std::error::Error::source(&err).is_some());
    }
}
