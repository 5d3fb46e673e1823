//! Well-known names on the SSH side of the filesystem.

use std::path::Path;

/// Standard SSH client paths, relative to their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SshPath {
    /// The `.ssh` directory under the user's home
    SshDir,
    /// The client config file inside `.ssh`
    ConfigFile,
    /// Backup directory created beside the config file
    BackupDir,
}

impl SshPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SshDir => ".ssh",
            Self::ConfigFile => "config",
            Self::BackupDir => "sshcm_backups",
        }
    }
}

impl AsRef<Path> for SshPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for SshPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SshPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suffix appended to every backup file name.
pub const BACKUP_SUFFIX: &str = "backup";

/// Indentation used for directives under a `Host` header.
pub const DEFAULT_INDENT: &str = "  ";
