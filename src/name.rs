//! Hierarchical node names
//!
//! A name such as `/camera/left/driver` is an ordered list of segments joined
//! by a separator. Parsing validates the shape once so the tree builder can
//! work on segments without re-checking.

use std::fmt;

use crate::error::{SelectorError, SelectorResult};

/// Separator used by graph resource names
pub const DEFAULT_SEPARATOR: char = '/';

/// A parsed, fully-qualified hierarchical name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    raw: String,
    separator: char,
    rooted: bool,
    segments: Vec<String>,
}

impl Name {
    /// Parse `raw` into segments.
    ///
    /// A leading separator is allowed and remembered. Empty input, a trailing
    /// separator and empty interior segments (`/a//b`) are rejected.
    pub fn parse(raw: &str, separator: char) -> SelectorResult<Self> {
        if raw.is_empty() {
            return Err(SelectorError::invalid_name(raw, "name is empty"));
        }

        let rooted = raw.starts_with(separator);
        let body = if rooted {
            &raw[separator.len_utf8()..]
        } else {
            raw
        };

        if body.is_empty() {
            return Err(SelectorError::invalid_name(
                raw,
                "name has no segments after the separator",
            ));
        }

        let mut segments = Vec::new();
        for (idx, segment) in body.split(separator).enumerate() {
            if segment.is_empty() {
                return Err(SelectorError::invalid_name(
                    raw,
                    format!("empty segment at position {}", idx + 1),
                ));
            }
            segments.push(segment.to_string());
        }

        Ok(Self {
            raw: raw.to_string(),
            separator,
            rooted,
            segments,
        })
    }

    /// The name exactly as it was discovered
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Whether the name starts with the separator
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// Accumulated path of the first `depth + 1` segments.
    ///
    /// `prefix_path(0)` of `/a/b/c` is `/a`; `prefix_path(2)` is the full name.
    pub fn prefix_path(&self, depth: usize) -> String {
        let end = (depth + 1).min(self.segments.len());
        let sep = self.separator.to_string();
        let joined = self.segments[..end].join(&sep);
        if self.rooted {
            format!("{}{}", sep, joined)
        } else {
            joined
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse every raw name, failing on the first malformed one
pub fn parse_all<I, S>(raw: I, separator: char) -> SelectorResult<Vec<Name>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|s| Name::parse(s.as_ref(), separator))
        .collect()
}
