//! Settings for locating the SSH config and its backups

use crate::constants::{DEFAULT_INDENT, SshPath};
use crate::{Error, Result, io};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the managed config lives and how it is written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the SSH client config file
    pub config_path: PathBuf,
    /// Backup directory; defaults to a directory beside the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
    /// Indentation for directives under a `Host` header
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

impl Settings {
    /// Settings for the config file at `config_path` with default backup
    /// location and indentation.
    pub fn for_config(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            backup_dir: None,
            indent: default_indent(),
        }
    }

    /// Settings for `~/.ssh/config` under the given home directory.
    pub fn for_home(home: &Path) -> Self {
        Self::for_config(home.join(SshPath::SshDir).join(SshPath::ConfigFile))
    }

    /// Override the backup directory.
    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(dir.into());
        self
    }

    /// Override the indentation.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Resolved backup directory.
    pub fn backup_dir(&self) -> PathBuf {
        match &self.backup_dir {
            Some(dir) => dir.clone(),
            None => self
                .config_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(SshPath::BackupDir),
        }
    }

    /// Check values that would otherwise corrupt the written config.
    ///
    /// The indent may only hold spaces and tabs. Anything else lands at the
    /// start of every directive line and changes how the file parses.
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.indent.chars().find(|c| !matches!(c, ' ' | '\t')) {
            return Err(Error::InvalidSettings {
                message: format!("indent may only contain spaces and tabs, found {bad:?}"),
            });
        }
        Ok(())
    }

    /// File name of the config, used as the backup name prefix.
    pub fn config_file_name(&self) -> String {
        self.config_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| SshPath::ConfigFile.as_str().to_string())
    }
}

/// Loads and saves [`Settings`] files.
///
/// Format is detected from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
#[derive(Debug, Default)]
pub struct SettingsStore;

impl SettingsStore {
    pub fn new() -> Self {
        Self
    }

    /// Load settings from a file.
    pub fn load(&self, path: &Path) -> Result<Settings> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::source_unavailable(path, e))?;
        let extension = extension_of(path);

        let settings: Settings = match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            })?,
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            })?,
            _ => return Err(Error::UnsupportedFormat { extension }),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a file using an atomic write.
    pub fn save(&self, path: &Path, settings: &Settings) -> Result<()> {
        let extension = extension_of(path);

        let content = match extension.as_str() {
            "toml" => toml::to_string_pretty(settings).map_err(|e| Error::ConfigSerialize {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            })?,
            "json" => {
                serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSerialize {
                    path: path.to_path_buf(),
                    format: "JSON".into(),
                    message: e.to_string(),
                })?
            }
            _ => return Err(Error::UnsupportedFormat { extension }),
        };

        io::write_atomic(path, content.as_bytes())
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
