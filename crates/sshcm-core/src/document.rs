//! The whole config file as an ordered list of Host records.

use crate::host::{ExportedHost, HostRecord};
use crate::split::split_host_sections;
use crate::{Error, Result};
use sshcm_fs::constants::DEFAULT_INDENT;
use sshcm_fs::{HashedContent, hash_bytes, io};
use std::io::{Read, Write};
use std::path::Path;

/// Parsed SSH config plus the version of the bytes it was parsed from.
///
/// Global options before the first `Host` line, comments and blank lines are
/// not retained, so [`serialize`](Self::serialize) is lossy for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    file_version: String,
    records: Vec<HostRecord>,
}

impl ConfigDocument {
    /// Read and parse the file at `path`, hashing it in the same pass.
    pub fn read(path: &Path) -> Result<Self> {
        let content = io::read_hashed(path)?;
        let document = Self::from_content(&content)?;
        tracing::debug!(
            ?path,
            records = document.records.len(),
            version = %document.file_version,
            "Parsed SSH config"
        );
        Ok(document)
    }

    /// Read and parse from any byte source. `origin` names the source in
    /// errors.
    pub fn read_from<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let content = io::read_hashed_from(reader).map_err(|source| Error::SourceUnavailable {
            path: origin.to_path_buf(),
            source,
        })?;
        Self::from_content(&content)
    }

    /// Parse in-memory bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::build(hash_bytes(bytes), bytes)
    }

    /// Parse bytes whose version was computed while reading them.
    pub fn from_content(content: &HashedContent) -> Result<Self> {
        Self::build(content.version.clone(), &content.bytes)
    }

    fn build(file_version: String, bytes: &[u8]) -> Result<Self> {
        let records = split_host_sections(bytes)
            .enumerate()
            .map(|(index, section)| HostRecord::parse_section(index, section))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            file_version,
            records,
        })
    }

    /// Hex SHA-256 of the raw bytes this document was read from.
    pub fn file_version(&self) -> &str {
        &self.file_version
    }

    /// Records in file order.
    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Host names in file order. Duplicates are kept.
    pub fn host_names(&self) -> Vec<&str> {
        self.records.iter().map(HostRecord::name).collect()
    }

    pub fn export(&self) -> Vec<ExportedHost> {
        self.records.iter().map(HostRecord::export).collect()
    }

    pub fn find(&self, identity: &str) -> Option<&HostRecord> {
        self.records.iter().find(|r| r.identity() == identity)
    }

    /// First record with this name, as ssh itself resolves duplicates.
    pub fn find_by_name(&self, name: &str) -> Option<&HostRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    /// Append a record after the existing ones.
    pub fn add_host(&mut self, record: HostRecord) {
        self.records.push(record);
    }

    /// Replace the record carrying `identity`, keeping its position.
    pub fn replace_host(&mut self, identity: &str, record: HostRecord) -> Result<()> {
        let slot = self.position(identity)?;
        self.records[slot] = record;
        Ok(())
    }

    /// Remove and return the record carrying `identity`.
    pub fn remove_host(&mut self, identity: &str) -> Result<HostRecord> {
        let slot = self.position(identity)?;
        Ok(self.records.remove(slot))
    }

    fn position(&self, identity: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.identity() == identity)
            .ok_or_else(|| Error::HostNotFound {
                identity: identity.to_string(),
            })
    }

    /// Canonical text: records separated by one blank line, ending with a
    /// newline. An empty document serializes to an empty string.
    pub fn serialize(&self, indent: &str) -> String {
        if self.records.is_empty() {
            return String::new();
        }
        let mut out = self
            .records
            .iter()
            .map(|r| r.render(indent))
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }

    /// Human-readable dump: each record under a banner naming the host.
    pub fn print_to<W: Write>(&self, out: &mut W, indent: &str) -> std::io::Result<()> {
        for record in &self.records {
            writeln!(out, "========== {} ==========", record.name())?;
            writeln!(out, "{}", record.render(indent))?;
            writeln!(out)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.serialize(DEFAULT_INDENT))
    }
}
