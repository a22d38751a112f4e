use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by the log pipeline
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Log file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Page size must be at least 1")]
    InvalidPageSize,

    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("Unknown time zone: {0}")]
    InvalidTimeZone(String),
}

impl LogError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::ReadError {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Map an open failure to the matching variant
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound(path.to_path_buf()),
            _ => Self::read(path, source),
        }
    }
}
