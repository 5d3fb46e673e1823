//! Filesystem layer for SSH Config Manager
//!
//! Provides content checksums, single-pass read-and-hash, collision-refusing
//! backups and atomic file replacement.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;

pub use checksum::{HashingReader, hash_bytes, hash_parts};
pub use config::{Settings, SettingsStore};
pub use constants::SshPath;
pub use error::{Error, Result};
pub use io::HashedContent;
