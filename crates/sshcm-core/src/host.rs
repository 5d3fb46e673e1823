//! Host records: one structured `Host` section and its identity token.

use crate::classify::{DirectiveKind, Line, classify};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sshcm_fs::hash_parts;

/// Plain field values of a Host section.
///
/// This is the shape callers fill in to build a new or updated record; it
/// carries no identity. [`HostRecord::new`] validates and normalizes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostFields {
    pub name: String,
    pub host_name: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub identity_file: Option<String>,
    pub other_lines: Vec<String>,
}

impl HostFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A parsed `Host` section.
///
/// Fields are read-only; to change a record, take its [`fields`](Self::fields),
/// edit them and build a new record. The identity is recomputed on every
/// construction, so it always reflects the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    identity: String,
    fields: HostFields,
}

impl HostRecord {
    /// Build a record from caller-supplied fields.
    ///
    /// Values are trimmed and empty optional values dropped. Fails with
    /// [`Error::InvalidRecord`] when the record could not be written and
    /// parsed back unchanged: an empty name, a value spanning several lines,
    /// or an other-line that is blank, a comment or a recognized directive.
    pub fn new(fields: HostFields) -> Result<Self> {
        let name = single_line("Host", &fields.name)?;
        if name.is_empty() {
            return Err(Error::invalid_record("Host name must not be empty"));
        }

        let optional = |kind: DirectiveKind, value: Option<String>| -> Result<Option<String>> {
            match value {
                Some(v) => {
                    let v = single_line(kind.keyword(), &v)?;
                    Ok((!v.is_empty()).then(|| v.to_string()))
                }
                None => Ok(None),
            }
        };

        let mut other_lines = Vec::with_capacity(fields.other_lines.len());
        for line in &fields.other_lines {
            let line = single_line("other line", line)?;
            match classify(line) {
                Line::Unknown(text) => other_lines.push(text.to_string()),
                Line::Blank => return Err(Error::invalid_record("other lines must not be blank")),
                Line::Comment => {
                    return Err(Error::invalid_record(format!(
                        "comment `{line}` would be dropped on the next read"
                    )));
                }
                Line::Directive(kind, _) => {
                    return Err(Error::invalid_record(format!(
                        "`{line}` is a {kind} directive; set the field instead"
                    )));
                }
            }
        }

        Ok(Self::assemble(HostFields {
            name: name.to_string(),
            host_name: optional(DirectiveKind::HostName, fields.host_name)?,
            port: optional(DirectiveKind::Port, fields.port)?,
            user: optional(DirectiveKind::User, fields.user)?,
            identity_file: optional(DirectiveKind::IdentityFile, fields.identity_file)?,
            other_lines,
        }))
    }

    /// Parse the `index`-th section of a config file.
    ///
    /// Blank lines and comments are dropped. Recognized directives fill their
    /// field, the last occurrence winning; this includes a repeated `Host`
    /// line. Everything else is kept in order as an other-line.
    pub fn parse_section(index: usize, section: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(section).map_err(|e| Error::MalformedSection {
            section: index,
            message: format!("not valid UTF-8: {e}"),
        })?;

        let fields = text.lines().map(classify).fold(
            HostFields::default(),
            |mut fields, line| {
                match line {
                    Line::Blank | Line::Comment => {}
                    Line::Directive(kind, value) => {
                        let value = Some(value.to_string());
                        match kind {
                            DirectiveKind::Host => fields.name = value.unwrap_or_default(),
                            DirectiveKind::HostName => fields.host_name = value,
                            DirectiveKind::Port => fields.port = value,
                            DirectiveKind::User => fields.user = value,
                            DirectiveKind::IdentityFile => fields.identity_file = value,
                        }
                    }
                    Line::Unknown(text) => fields.other_lines.push(text.to_string()),
                }
                fields
            },
        );

        if fields.name.is_empty() {
            return Err(Error::MalformedSection {
                section: index,
                message: "Host line has no name".to_string(),
            });
        }

        Ok(Self::assemble(fields))
    }

    fn assemble(fields: HostFields) -> Self {
        let identity = compute_identity(&fields);
        Self { identity, fields }
    }

    /// Hex SHA-256 over the record's content; the record's version stamp.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn host_name(&self) -> Option<&str> {
        self.fields.host_name.as_deref()
    }

    pub fn port(&self) -> Option<&str> {
        self.fields.port.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.fields.user.as_deref()
    }

    pub fn identity_file(&self) -> Option<&str> {
        self.fields.identity_file.as_deref()
    }

    pub fn other_lines(&self) -> &[String] {
        &self.fields.other_lines
    }

    /// Copy of the field values, for building an updated record.
    pub fn fields(&self) -> HostFields {
        self.fields.clone()
    }

    /// Write this record in canonical form: the `Host` header, then each
    /// present field and every other-line, indented with `indent`.
    pub fn render(&self, indent: &str) -> String {
        let mut out = format!("{} {}", DirectiveKind::Host, self.fields.name);

        let present = [
            (DirectiveKind::HostName, &self.fields.host_name),
            (DirectiveKind::Port, &self.fields.port),
            (DirectiveKind::User, &self.fields.user),
            (DirectiveKind::IdentityFile, &self.fields.identity_file),
        ];
        for (kind, value) in present {
            if let Some(value) = value {
                out.push_str(&format!("\n{indent}{kind} {value}"));
            }
        }
        for line in &self.fields.other_lines {
            out.push_str(&format!("\n{indent}{line}"));
        }

        out
    }

    /// Stable external view of this record.
    pub fn export(&self) -> ExportedHost {
        ExportedHost {
            id: self.identity.clone(),
            name: self.fields.name.clone(),
            host_name: self.fields.host_name.clone().unwrap_or_default(),
            port: self.fields.port.clone().unwrap_or_default(),
            user: self.fields.user.clone().unwrap_or_default(),
            identity_file: self.fields.identity_file.clone().unwrap_or_default(),
            other_lines: self.fields.other_lines.clone(),
        }
    }
}

// Concatenation in fixed field order; absent fields contribute nothing.
fn compute_identity(fields: &HostFields) -> String {
    let scalars = [
        Some(&fields.name),
        fields.host_name.as_ref(),
        fields.port.as_ref(),
        fields.user.as_ref(),
        fields.identity_file.as_ref(),
    ];
    hash_parts(
        scalars
            .into_iter()
            .flatten()
            .chain(fields.other_lines.iter())
            .map(String::as_bytes),
    )
}

fn single_line<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    if value.contains(['\n', '\r']) {
        return Err(Error::invalid_record(format!(
            "{what} value must fit on one line"
        )));
    }
    Ok(value.trim())
}

/// External view of a Host record.
///
/// Kept separate from [`HostRecord`] so the record's internals can change
/// without breaking consumers. Absent values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedHost {
    pub id: String,
    pub name: String,
    pub host_name: String,
    pub port: String,
    pub user: String,
    pub identity_file: String,
    pub other_lines: Vec<String>,
}
