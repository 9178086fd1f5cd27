//! Error types shared across gtcompose crates.

use std::path::PathBuf;

/// Top-level error type for gtcompose operations.
#[derive(Debug, thiserror::Error)]
pub enum GtError {
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Value out of range: {message}")]
    OutOfRange { message: String },

    #[error("Unknown attribute: {key}")]
    UnknownAttribute { key: String },

    #[error("Invalid timing: start {start}, duration {duration} (start must be >= 0, duration > 0)")]
    InvalidTiming { start: f64, duration: f64 },

    #[error("Duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("Unresolved reference: '{referenced_by}' refers to missing object '{name}'")]
    UnresolvedReference { name: String, referenced_by: String },

    #[error("Cyclic bounding reference through '{name}'")]
    CyclicReference { name: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("XML error: {message}")]
    Xml { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GtError.
pub type GtResult<T> = Result<T, GtError>;

impl GtError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: msg.into(),
        }
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange {
            message: msg.into(),
        }
    }

    pub fn unknown_attribute(key: impl Into<String>) -> Self {
        Self::UnknownAttribute { key: key.into() }
    }

    pub fn invalid_timing(start: f64, duration: f64) -> Self {
        Self::InvalidTiming { start, duration }
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn unresolved(name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }

    pub fn cyclic(name: impl Into<String>) -> Self {
        Self::CyclicReference { name: name.into() }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive {
            message: msg.into(),
        }
    }

    pub fn xml(msg: impl Into<String>) -> Self {
        Self::Xml {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
