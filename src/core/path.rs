// src/core/path.rs

//! Path grammar and parser.
//!
//! A path is a dot-separated list of segments:
//!
//! ```text
//! Path    := Segment ('.' Segment)*
//! Segment := Key | '[' Digits ']' | '[]'
//! ```
//!
//! `obj.key`, `arr.[0]`, `arr.[0].[3]`, `arr.[0].newField` and `arr.[]` are all valid.
//! The append marker `[]` may only be the last segment.

use super::errors::{Result, SpinelJsonError};
use std::fmt;
use std::str::FromStr;

/// One atomic step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object field access by name.
    Key(String),
    /// Zero-based array element access.
    Index(usize),
    /// One past the end of an array. Only valid as the final segment of a write.
    Append,
}

impl Segment {
    pub fn key(k: impl Into<String>) -> Self {
        Segment::Key(k.into())
    }

    pub fn is_append(&self) -> bool {
        matches!(self, Segment::Append)
    }

    /// Parses a single segment. `path` is only used for error messages.
    fn parse(raw: &str, path: &str) -> Result<Self> {
        let malformed = |reason: String| SpinelJsonError::MalformedPath {
            path: path.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(malformed("empty segment".to_string()));
        }

        let Some(rest) = raw.strip_prefix('[') else {
            return Ok(Segment::Key(raw.to_string()));
        };
        let Some(inner) = rest.strip_suffix(']') else {
            return Err(malformed(format!("unterminated index segment '{raw}'")));
        };

        if inner.is_empty() {
            return Ok(Segment::Append);
        }
        if !inner.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(format!(
                "index '{inner}' must be a non-negative decimal integer"
            )));
        }
        inner
            .parse::<usize>()
            .map(Segment::Index)
            .map_err(|_| malformed(format!("index '{inner}' is too large")))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "[{i}]"),
            Segment::Append => f.write_str("[]"),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Key(s.to_owned())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Key(s)
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// A parsed, non-empty path.
///
/// # Examples
///
/// ```
/// use spineljson::core::path::{Path, Segment};
///
/// let path: Path = "users.[0].name".parse().unwrap();
/// assert_eq!(path.segments()[1], Segment::Index(0));
/// assert_eq!(path.to_string(), "users.[0].name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    /// Parses a path string. Fails on the first rule violation; never partially succeeds.
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_with_limit(s, 0)
    }

    /// Like [`Path::parse`], but also rejects paths with more than `max_segments`
    /// segments. A limit of `0` disables the check.
    pub fn parse_with_limit(s: &str, max_segments: usize) -> Result<Self> {
        if s.is_empty() {
            return Err(SpinelJsonError::EmptyPath);
        }

        let mut segments = Vec::new();
        for raw in s.split('.') {
            if segments.last().is_some_and(Segment::is_append) {
                return Err(SpinelJsonError::MalformedPath {
                    path: s.to_string(),
                    reason: "append marker '[]' must be the last segment".to_string(),
                });
            }
            segments.push(Segment::parse(raw, s)?);
            if max_segments > 0 && segments.len() > max_segments {
                return Err(SpinelJsonError::PathTooDeep {
                    path: s.to_string(),
                    max: max_segments,
                });
            }
        }
        Ok(Path(segments))
    }

    /// Builds a path from already-constructed segments.
    ///
    /// Applies the same structural rules as [`Path::parse`], so the result always
    /// displays as text that parses back to the same path.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(SpinelJsonError::EmptyPath);
        }
        let path = Path(segments);
        path.validate()?;
        Ok(path)
    }

    /// Starts a builder-style path with a single key segment.
    pub fn root_key(k: impl Into<String>) -> Result<Self> {
        Self::from_segments(vec![Segment::Key(k.into())])
    }

    /// Appends a key segment (builder pattern).
    pub fn key(self, k: impl Into<String>) -> Result<Self> {
        self.push(Segment::Key(k.into()))
    }

    /// Appends an index segment (builder pattern).
    pub fn index(self, i: usize) -> Result<Self> {
        self.push(Segment::Index(i))
    }

    /// Appends the terminal append marker (builder pattern).
    pub fn append(self) -> Result<Self> {
        self.push(Segment::Append)
    }

    fn push(mut self, seg: Segment) -> Result<Self> {
        self.0.push(seg);
        self.validate()?;
        Ok(self)
    }

    /// Rejects segments that [`Path::parse`] could never produce: empty keys, keys
    /// containing `.` or starting with `[`, and `Append` anywhere but last.
    fn validate(&self) -> Result<()> {
        let last = self.0.len().saturating_sub(1);
        for (i, seg) in self.0.iter().enumerate() {
            let reason = match seg {
                Segment::Key(k) if k.is_empty() => "empty segment".to_string(),
                Segment::Key(k) if k.contains('.') => format!("key '{k}' contains '.'"),
                Segment::Key(k) if k.starts_with('[') => format!("key '{k}' starts with '['"),
                Segment::Append if i != last => {
                    "append marker '[]' must be the last segment".to_string()
                }
                _ => continue,
            };
            return Err(SpinelJsonError::MalformedPath {
                path: self.to_string(),
                reason,
            });
        }
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Canonical text of the first `n` segments, used to locate errors.
    pub fn prefix_text(&self, n: usize) -> String {
        join(&self.0[..n.min(self.0.len())])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }
}

fn join(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&seg.to_string());
    }
    out
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.0))
    }
}

impl FromStr for Path {
    type Err = SpinelJsonError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = SpinelJsonError;

    fn try_from(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl TryFrom<String> for Path {
    type Error = SpinelJsonError;

    fn try_from(s: String) -> Result<Self> {
        Path::parse(&s)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
