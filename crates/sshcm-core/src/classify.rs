//! Line classification for SSH config text.
//!
//! Each line is judged on its own, after trimming surrounding whitespace:
//!
//! ```text
//! ""                      -> Blank
//! "# anything"            -> Comment
//! "HostName 10.0.0.1"     -> Directive(HostName, "10.0.0.1")
//! "ForwardAgent yes"      -> Unknown("ForwardAgent yes")
//! ```

/// The directives parsed into dedicated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Host,
    HostName,
    Port,
    User,
    IdentityFile,
}

impl DirectiveKind {
    /// All recognized directives.
    pub const ALL: [DirectiveKind; 5] = [
        Self::Host,
        Self::HostName,
        Self::Port,
        Self::User,
        Self::IdentityFile,
    ];

    /// Canonical spelling used when writing the directive.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Host => "Host",
            Self::HostName => "HostName",
            Self::Port => "Port",
            Self::User => "User",
            Self::IdentityFile => "IdentityFile",
        }
    }

    /// Match a keyword case-insensitively.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl std::fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A classified line. Text borrows from the input and is already trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Directive(DirectiveKind, &'a str),
    Unknown(&'a str),
}

/// Classify one line of config text.
///
/// A directive needs a space after its keyword, so `HostNameX foo` stays
/// [`Line::Unknown`].
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with('#') {
        return Line::Comment;
    }

    if let Some((keyword, value)) = trimmed.split_once(' ')
        && let Some(kind) = DirectiveKind::from_keyword(keyword)
    {
        return Line::Directive(kind, value.trim());
    }

    Line::Unknown(trimmed)
}
