//! Error types for sshcm-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from sshcm-core
    #[error(transparent)]
    Core(#[from] sshcm_core::Error),

    /// Settings file error from sshcm-fs, raised while loading `--settings`.
    /// Config reads and writes report through [`CliError::Core`].
    #[error(transparent)]
    Fs(#[from] sshcm_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
