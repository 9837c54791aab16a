use std::fmt;

use thiserror::Error;

use crate::validate::Violations;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Missing argument: {argument}")]
    ArgumentMissing { argument: &'static str },

    #[error("Validation failed: {0}")]
    ValidationFailed(Violations),

    #[error("The specified '{entity}' value is already in use for {field}: {value}")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Host not found: {host}")]
    NotFound { host: String },
}

/// Discriminant of [`Error`], used by transport layers to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ArgumentMissing,
    ValidationFailed,
    AlreadyExists,
    NotFound,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ArgumentMissing { .. } => ErrorKind::ArgumentMissing,
            Error::ValidationFailed(_) => ErrorKind::ValidationFailed,
            Error::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Error::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    pub(crate) fn not_found(host: &str) -> Self {
        Error::NotFound {
            host: host.to_string(),
        }
    }
}

impl ErrorKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::ArgumentMissing => "ArgumentMissing",
            ErrorKind::ValidationFailed => "ValidationFailed",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::NotFound => "NotFound",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
