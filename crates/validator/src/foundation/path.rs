//! Field paths
//!
//! A [`Path`] is an immutable, append-only sequence of [`PathSegment`]s that
//! locates a value inside a validated structure. Traversal starts from an
//! empty path and extends it one segment at a time while descending into
//! map keys, record members, and array elements.
//!
//! Rendering joins names with `.` and writes indices as `[n]` directly after
//! the previous segment:
//!
//! ```
//! use stencil_validator::path;
//!
//! assert_eq!(path!["user", "email"].to_string(), "user.email");
//! assert_eq!(path!["tags", 1usize].to_string(), "tags[1]");
//! assert_eq!(path![0usize, "name"].to_string(), "[0].name");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// PATH SEGMENT
// ============================================================================

/// One step of a [`Path`]: a field name or a zero-based element index.
///
/// A name and an index are never equal, even when the name spells a number
/// (`Key("0") != Index(0)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Element index inside an array.
    Index(usize),
    /// Key inside a map or external member name inside a record.
    Key(String),
}

impl PathSegment {
    /// Returns the field name, if this is a key segment.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns the element index, if this is an index segment.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(_) => None,
        }
    }

    /// Returns `true` for index segments.
    #[must_use]
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

// ============================================================================
// PATH
// ============================================================================

/// Location of a value inside a nested structure.
///
/// Appending with [`join`](Path::join) returns a new path and leaves the
/// original untouched, so a parent path can be shared by every child visit.
/// Serializes as an array of strings and integers (`["tags", 0]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: SmallVec<[PathSegment; 4]>,
}

impl Path {
    /// The empty path (form level / top of the document).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from a sequence of segments.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Returns a new path with `segment` appended.
    #[must_use = "join returns a new path and does not modify the original"]
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = SmallVec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns a new path with every segment of `relative` appended.
    #[must_use = "concat returns a new path and does not modify the original"]
    pub fn concat(&self, relative: &Path) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        Self { segments }
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Iterates over the segments.
    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Alias for [`is_empty`](Path::is_empty) that reads better at call sites.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path without its last segment, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self::from_segments(init.iter().cloned()))
    }

    /// Key used to group field-level errors: the rendered prefix before the
    /// first index segment, so `tags[0]` and `tags[1]` both map to `tags`.
    pub(crate) fn field_key(&self) -> String {
        let end = self
            .segments
            .iter()
            .position(PathSegment::is_index)
            .unwrap_or(self.segments.len());
        Self::from_segments(self.segments[..end].iter().cloned()).to_string()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if position == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
            }
        }
        Ok(())
    }
}

impl From<PathSegment> for Path {
    fn from(segment: PathSegment) -> Self {
        Self::from_segments([segment])
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::from_segments(segments)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter.into_iter().map(Into::into))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Error returned when a rendered path string cannot be parsed back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParsePathError {
    /// A `[` without a matching `]`.
    #[error("unclosed '[' at byte {position}")]
    UnclosedBracket { position: usize },

    /// Bracket contents that are not a non-negative integer.
    #[error("invalid index '{index}' at byte {position}")]
    InvalidIndex { index: String, position: usize },

    /// A `.` followed by nothing, `.`, or `[`.
    #[error("empty field name at byte {position}")]
    EmptyName { position: usize },

    /// A name directly after `]` without a separating `.`.
    #[error("expected '.' or '[' at byte {position}")]
    MissingSeparator { position: usize },
}

impl FromStr for Path {
    type Err = ParsePathError;

    /// Parses the rendered form produced by `Display`.
    ///
    /// Round-trips every path whose names contain neither `.` nor `[`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut segments = SmallVec::new();
        let mut rest = input;

        while !rest.is_empty() {
            let position = input.len() - rest.len();

            if let Some(inner) = rest.strip_prefix('[') {
                let close = inner
                    .find(']')
                    .ok_or(ParsePathError::UnclosedBracket { position })?;
                let digits = &inner[..close];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParsePathError::InvalidIndex {
                        index: digits.to_owned(),
                        position,
                    });
                }
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| ParsePathError::InvalidIndex {
                        index: digits.to_owned(),
                        position,
                    })?;
                segments.push(PathSegment::Index(index));
                rest = &inner[close + 1..];
                continue;
            }

            let name_start = if position == 0 {
                rest
            } else {
                rest.strip_prefix('.')
                    .ok_or(ParsePathError::MissingSeparator { position })?
            };
            let end = name_start.find(['.', '[']).unwrap_or(name_start.len());
            if end == 0 {
                return Err(ParsePathError::EmptyName { position });
            }
            segments.push(PathSegment::Key(name_start[..end].to_owned()));
            rest = &name_start[end..];
        }

        Ok(Self { segments })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use rstest::rstest;

    #[rstest]
    #[case(path![], "")]
    #[case(path!["user"], "user")]
    #[case(path!["user", "email"], "user.email")]
    #[case(path!["tags", 0usize], "tags[0]")]
    #[case(path!["items", 2usize, "name"], "items[2].name")]
    #[case(path!["matrix", 0usize, 1usize], "matrix[0][1]")]
    #[case(path![3usize], "[3]")]
    #[case(path![0usize, 1usize], "[0][1]")]
    fn renders_paths(#[case] path: Path, #[case] expected: &str) {
        assert_eq!(path.to_string(), expected);
    }

    #[test]
    fn key_and_index_are_distinct() {
        assert_ne!(path!["0"], path![0usize]);
        assert_eq!(path!["a", 1usize], path!["a", 1usize]);
        assert_ne!(path!["a"], path!["a", "b"]);
    }

    #[test]
    fn join_does_not_mutate_the_original() {
        let base = path!["user"];
        let email = base.join("email");
        let name = base.join("name");

        assert_eq!(base.len(), 1);
        assert_eq!(email, path!["user", "email"]);
        assert_eq!(name, path!["user", "name"]);
    }

    #[test]
    fn concat_appends_relative_path() {
        let base = path!["form"];
        assert_eq!(base.concat(&path!["rows", 2usize]), path!["form", "rows", 2usize]);
        assert_eq!(base.concat(&Path::root()), base);
    }

    #[test]
    fn parent_and_last() {
        let path = path!["a", 0usize, "b"];
        assert_eq!(path.last(), Some(&PathSegment::Key("b".into())));
        assert_eq!(path.parent(), Some(path!["a", 0usize]));
        assert_eq!(Path::root().parent(), None);
    }

    #[test]
    fn field_key_stops_at_first_index() {
        assert_eq!(path!["tags", 0usize].field_key(), "tags");
        assert_eq!(path!["items", 1usize, "name"].field_key(), "items");
        assert_eq!(path!["user", "email"].field_key(), "user.email");
        assert_eq!(path![0usize].field_key(), "");
    }

    #[rstest]
    #[case("user.addresses[1].zip", path!["user", "addresses", 1usize, "zip"])]
    #[case("[0][2]", path![0usize, 2usize])]
    #[case("[4].name", path![4usize, "name"])]
    #[case("", Path::root())]
    fn parses_rendered_paths(#[case] input: &str, #[case] expected: Path) {
        assert_eq!(input.parse::<Path>(), Ok(expected));
    }

    #[rstest]
    #[case("tags[1", ParsePathError::UnclosedBracket { position: 4 })]
    #[case("tags[x]", ParsePathError::InvalidIndex { index: "x".into(), position: 4 })]
    #[case("tags[]", ParsePathError::InvalidIndex { index: String::new(), position: 4 })]
    #[case("user..email", ParsePathError::EmptyName { position: 4 })]
    #[case("tags[0]name", ParsePathError::MissingSeparator { position: 7 })]
    fn rejects_malformed_paths(#[case] input: &str, #[case] expected: ParsePathError) {
        assert_eq!(input.parse::<Path>(), Err(expected));
    }

    #[test]
    fn serializes_as_mixed_array() {
        let path = path!["tags", 0usize];
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["tags", 0]));

        let back: Path = serde_json::from_value(json).unwrap();
        assert_eq!(back, path);
    }
}
