//! Peer identities
//!
//! An [`Identity`] is the canonical form of a peer's display name and the
//! only key used by the buffer and the store. Canonicalisation happens in
//! the host before a name reaches the tracker; see [`normalize_display_name`].

use std::fmt;

/// Canonical peer name used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    /// Wrap an already-normalised name. No normalisation is applied.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the name is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Canonicalise a raw display name into an [`Identity`].
///
/// Strips `<tag>` markup, maps non-breaking spaces, `_` and `-` to plain
/// spaces, drops any remaining non-ASCII characters and trims.
pub fn normalize_display_name(raw: &str) -> Identity {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;

    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '\u{00A0}' | '_' | '-' => out.push(' '),
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }

    Identity(out.trim().to_string())
}
