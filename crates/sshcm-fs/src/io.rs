//! Hash-while-reading, backups and atomic replacement

use crate::checksum::HashingReader;
use crate::constants::BACKUP_SUFFIX;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Raw file bytes together with the digest computed while reading them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedContent {
    pub bytes: Vec<u8>,
    pub version: String,
}

/// Drain `reader`, hashing every byte on the way through.
pub fn read_hashed_from<R: Read>(reader: R) -> io::Result<HashedContent> {
    let mut reader = HashingReader::new(reader);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(HashedContent {
        bytes,
        version: reader.finalize(),
    })
}

/// Read a file once, returning its bytes and their version token.
pub fn read_hashed(path: &Path) -> Result<HashedContent> {
    let file = File::open(path).map_err(|e| Error::source_unavailable(path, e))?;
    let content = read_hashed_from(file).map_err(|e| Error::source_unavailable(path, e))?;
    tracing::debug!(
        ?path,
        bytes = content.bytes.len(),
        version = %content.version,
        "Read and hashed file"
    );
    Ok(content)
}

/// Create the backup directory (and parents) if missing.
///
/// Succeeds when the directory already exists. New directories are
/// owner-only on Unix.
pub fn ensure_backup_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(dir)
        .map_err(|e| Error::backup_write(dir, e))
}

/// Backup file name for `file_name` taken at `timestamp`.
///
/// Microsecond resolution keeps names from distinct writes apart.
pub fn backup_file_name(file_name: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}.{}.{}",
        file_name,
        timestamp.format("%Y%m%dT%H%M%S%.6f"),
        BACKUP_SUFFIX
    )
}

/// Write `content` to a new backup file inside `backup_dir`.
///
/// Refuses to touch an existing file of the same name. The file is synced and
/// closed before this returns, so a successful return means the backup is
/// complete on disk.
pub fn write_backup(
    backup_dir: &Path,
    file_name: &str,
    content: &[u8],
    timestamp: DateTime<Utc>,
) -> Result<PathBuf> {
    ensure_backup_dir(backup_dir)?;

    let backup_path = backup_dir.join(backup_file_name(file_name, timestamp));

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&backup_path).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            Error::BackupCollision {
                path: backup_path.clone(),
            }
        } else {
            Error::backup_write(&backup_path, e)
        }
    })?;

    file.write_all(content)
        .map_err(|e| Error::backup_write(&backup_path, e))?;
    file.sync_all()
        .map_err(|e| Error::backup_write(&backup_path, e))?;
    drop(file);

    tracing::debug!(path = ?backup_path, bytes = content.len(), "Backup written");
    Ok(backup_path)
}

/// Path of the staging file used by [`write_atomic`] for `path`.
pub fn staging_path(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}

/// Replace the contents of `path` atomically.
///
/// Stages into a sibling file, syncs it, then renames over the target so
/// readers see either the old or the new contents. An existing target keeps
/// its permissions. When `path` is a symlink the file it points to is
/// replaced and the link is left in place. On failure the target is left
/// untouched.
///
/// The staging file is created exclusively. A leftover or concurrent staging
/// file makes the write fail with [`Error::TargetWriteFailed`] and is not
/// removed.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_target(path)?;

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::target_write(parent, e))?;
    }

    let temp_path = staging_path(&target);
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let temp_file = options
        .open(&temp_path)
        .map_err(|e| Error::target_write(&temp_path, e))?;

    let result = stage_and_rename(temp_file, &temp_path, &target, content);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// The file a write to `path` should land on: the link target for a
/// symlink, `path` itself otherwise.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            let target = fs::canonicalize(path).map_err(|e| Error::target_write(path, e))?;
            tracing::debug!(link = ?path, ?target, "Writing through symlink");
            Ok(target)
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn stage_and_rename(
    mut temp_file: File,
    temp_path: &Path,
    target: &Path,
    content: &[u8],
) -> Result<()> {
    if let Ok(metadata) = fs::metadata(target) {
        temp_file
            .set_permissions(metadata.permissions())
            .map_err(|e| Error::target_write(temp_path, e))?;
    }

    temp_file
        .write_all(content)
        .map_err(|e| Error::target_write(temp_path, e))?;
    temp_file
        .sync_all()
        .map_err(|e| Error::target_write(temp_path, e))?;
    drop(temp_file);

    fs::rename(temp_path, target).map_err(|e| Error::target_write(target, e))
}
