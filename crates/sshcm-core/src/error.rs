//! Error types for sshcm-core

use std::path::PathBuf;

/// Result type for sshcm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sshcm-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The config file could not be opened or read
    #[error("Cannot read SSH config at {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A Host section could not be split into lines
    #[error("Malformed Host section #{section}: {message}")]
    MalformedSection { section: usize, message: String },

    /// The file changed on disk since the caller read it
    #[error("{path} was modified externally (expected version {expected}, found {actual})")]
    ConcurrentModification {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// The generated backup name is already taken
    #[error("Backup file already exists: {path}")]
    BackupCollision { path: PathBuf },

    /// Copying the current config into the backup failed
    #[error("Failed to write backup {path}: {source}")]
    BackupWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the new config failed after the backup was taken
    #[error("Failed to write SSH config {path}: {source}")]
    TargetWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No record in the document carries this identity
    #[error("No Host record with identity {identity}")]
    HostNotFound { identity: String },

    /// The on-disk record no longer matches the identity the caller holds
    #[error("Host record {identity} changed or was removed on disk")]
    StaleRecord { identity: String },

    /// A caller-built record would not survive serialization
    #[error("Invalid Host record: {message}")]
    InvalidRecord { message: String },

    /// Other filesystem layer errors (settings files)
    #[error(transparent)]
    Fs(sshcm_fs::Error),
}

impl Error {
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}

impl From<sshcm_fs::Error> for Error {
    fn from(err: sshcm_fs::Error) -> Self {
        match err {
            sshcm_fs::Error::SourceUnavailable { path, source } => {
                Self::SourceUnavailable { path, source }
            }
            sshcm_fs::Error::BackupCollision { path } => Self::BackupCollision { path },
            sshcm_fs::Error::BackupWriteFailed { path, source } => {
                Self::BackupWriteFailed { path, source }
            }
            sshcm_fs::Error::TargetWriteFailed { path, source } => {
                Self::TargetWriteFailed { path, source }
            }
            other => Self::Fs(other),
        }
    }
}
