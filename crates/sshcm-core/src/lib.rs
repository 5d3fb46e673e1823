//! Core layer for SSH Config Manager
//!
//! Parses an SSH client config into Host records, gives every record and the
//! whole file a content-derived version token, and writes changes back with a
//! backup taken first:
//!
//! - **classify**: one trimmed line to blank, comment, directive or unknown
//! - **split**: raw bytes to one slice per `Host` section
//! - **host**: a section folded into a [`HostRecord`] with its identity
//! - **document**: the ordered records plus the file version
//! - **writer**: compare-and-swap writes through [`SafeWriter`]
//!
//! ```text
//!                 sshcm-cli
//!                     |
//!                sshcm-core
//!                     |
//!                 sshcm-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sshcm_core::{HostRecord, SafeWriter};
//! use sshcm_fs::Settings;
//!
//! fn bump_port() -> sshcm_core::Result<()> {
//!     let writer = SafeWriter::new(Settings::for_config("/home/me/.ssh/config"));
//!     let mut doc = writer.read()?;
//!     if let Some(record) = doc.find_by_name("build") {
//!         let mut fields = record.fields();
//!         fields.port = Some("2222".into());
//!         let id = record.identity().to_string();
//!         doc.replace_host(&id, HostRecord::new(fields)?)?;
//!     }
//!     let backup = writer.update(&doc, doc.file_version())?;
//!     println!("previous config saved to {}", backup.display());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod document;
pub mod error;
pub mod host;
pub mod split;
pub mod writer;

pub use classify::{DirectiveKind, Line, classify};
pub use document::ConfigDocument;
pub use error::{Error, Result};
pub use host::{ExportedHost, HostFields, HostRecord};
pub use split::{HostSections, split_host_sections};
pub use writer::{SafeWriter, read_config, update_config};
