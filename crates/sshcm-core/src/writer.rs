//! Backup-then-replace writes guarded by version tokens.
//!
//! Every write follows the same order:
//!
//! 1. re-read the on-disk file and hash it
//! 2. refuse if it is not the version the caller worked from
//! 3. copy those exact bytes into a new backup file, synced and closed
//! 4. atomically replace the config with the new serialized text
//!
//! The target is never opened for writing before step 3 has succeeded, so a
//! failed write always leaves either the untouched original or a complete
//! backup of it.

use crate::document::ConfigDocument;
use crate::host::HostRecord;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sshcm_fs::{HashedContent, Settings, io};
use std::path::PathBuf;

/// Source of backup timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Reads and writes one SSH config file described by [`Settings`].
#[derive(Debug, Clone)]
pub struct SafeWriter {
    settings: Settings,
    clock: Clock,
}

impl SafeWriter {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            clock: Utc::now,
        }
    }

    /// Use a different timestamp source for backup names.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read the current config.
    pub fn read(&self) -> Result<ConfigDocument> {
        ConfigDocument::read(&self.settings.config_path)
    }

    /// Persist `document` if the file is still at `expected_version`.
    ///
    /// Returns the path of the backup holding the replaced contents. Invalid
    /// settings fail before the backup is taken.
    pub fn update(&self, document: &ConfigDocument, expected_version: &str) -> Result<PathBuf> {
        let current = io::read_hashed(&self.settings.config_path)?;

        if current.version != expected_version {
            tracing::warn!(
                path = ?self.settings.config_path,
                expected = %expected_version,
                actual = %current.version,
                "Refusing write: config changed since it was read"
            );
            return Err(Error::ConcurrentModification {
                path: self.settings.config_path.clone(),
                expected: expected_version.to_string(),
                actual: current.version,
            });
        }

        self.replace(&current, document)
    }

    /// Replace the on-disk record whose identity is `identity`.
    ///
    /// Edits elsewhere in the file since the caller read it are kept. Fails
    /// with [`Error::StaleRecord`] if that record itself changed or vanished.
    pub fn update_host(&self, identity: &str, record: HostRecord) -> Result<PathBuf> {
        self.modify(identity, |document| document.replace_host(identity, record))
    }

    /// Remove the on-disk record whose identity is `identity`.
    pub fn remove_host(&self, identity: &str) -> Result<PathBuf> {
        self.modify(identity, |document| document.remove_host(identity).map(drop))
    }

    /// Append a record to the on-disk config.
    pub fn add_host(&self, record: HostRecord) -> Result<PathBuf> {
        let current = io::read_hashed(&self.settings.config_path)?;
        let mut document = ConfigDocument::from_content(&current)?;
        document.add_host(record);
        self.replace(&current, &document)
    }

    fn modify<F>(&self, identity: &str, change: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut ConfigDocument) -> Result<()>,
    {
        let current = io::read_hashed(&self.settings.config_path)?;
        let mut document = ConfigDocument::from_content(&current)?;

        change(&mut document).map_err(|e| match e {
            Error::HostNotFound { .. } => Error::StaleRecord {
                identity: identity.to_string(),
            },
            other => other,
        })?;

        self.replace(&current, &document)
    }

    fn replace(&self, current: &HashedContent, document: &ConfigDocument) -> Result<PathBuf> {
        let target = &self.settings.config_path;
        self.settings.validate()?;

        let backup = io::write_backup(
            &self.settings.backup_dir(),
            &self.settings.config_file_name(),
            &current.bytes,
            (self.clock)(),
        )?;

        let text = document.serialize(&self.settings.indent);
        io::write_atomic(target, text.as_bytes())?;

        tracing::info!(
            path = ?target,
            backup = ?backup,
            records = document.len(),
            "SSH config updated"
        );
        Ok(backup)
    }
}

/// Read the config named by `settings`.
pub fn read_config(settings: &Settings) -> Result<ConfigDocument> {
    ConfigDocument::read(&settings.config_path)
}

/// Write `document` over the config named by `settings` if it is still at
/// `expected_version`, returning the backup path.
pub fn update_config(
    settings: &Settings,
    document: &ConfigDocument,
    expected_version: &str,
) -> Result<PathBuf> {
    SafeWriter::new(settings.clone()).update(document, expected_version)
}
