//! Error types for sshcm-fs

use std::path::PathBuf;

/// Result type for sshcm-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sshcm-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot read {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backup file already exists: {path}")]
    BackupCollision { path: PathBuf },

    #[error("Failed to write backup {path}: {source}")]
    BackupWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    TargetWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} settings at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} settings for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported settings format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },
}

impl Error {
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn backup_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BackupWriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn target_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::TargetWriteFailed {
            path: path.into(),
            source,
        }
    }
}
