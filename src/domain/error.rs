//! Error taxonomy shared by every helper
//!
//! Each call ends in one of three shell outcomes: success, an
//! operation-specific failure, or invalid usage. [`ErrorKind::exit_code`]
//! maps the closed set of kinds onto those outcomes.

use std::fmt;

use thiserror::Error;

/// Boxed error raised by a caller-supplied callback
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Exit status for invalid usage (missing arguments, bad input shape)
pub const EXIT_USAGE: u8 = 2;

/// Exit status for an operation-specific failure
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Error)]
pub enum UtilError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Predicate false: {0}")]
    PredicateFalse(String),

    #[error("External operation failed: {0}")]
    ExternalOperationFailed(String),

    #[error("Callback failed on {context}")]
    CallbackFailed {
        context: String,
        #[source]
        source: BoxError,
    },
}

/// Closed classification of [`UtilError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    PredicateFalse,
    ExternalOperationFailed,
    CallbackFailed,
}

impl ErrorKind {
    /// Process exit status a shell caller observes for this kind
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidArgument => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::PredicateFalse => "predicate_false",
            ErrorKind::ExternalOperationFailed => "external_operation_failed",
            ErrorKind::CallbackFailed => "callback_failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UtilError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UtilError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            UtilError::NotFound(_) => ErrorKind::NotFound,
            UtilError::PredicateFalse(_) => ErrorKind::PredicateFalse,
            UtilError::ExternalOperationFailed(_) => ErrorKind::ExternalOperationFailed,
            UtilError::CallbackFailed { .. } => ErrorKind::CallbackFailed,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        UtilError::InvalidArgument(message.into())
    }

    pub(crate) fn callback(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        UtilError::CallbackFailed {
            context: context.into(),
            source: source.into(),
        }
    }
}
