//! Type-safe wrapper for namespace tree positions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered sequence of segment names locating a namespace in a tree.
///
/// The empty sequence is the distinguished tree root. Paths are immutable
/// once constructed; `child` and `join` return new values.
///
/// Ensures namespace paths cannot be accidentally used where table names are
/// expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NamespacePath(Vec<String>);

impl NamespacePath {
    /// Creates a path from an ordered sequence of segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The root of a namespace tree (empty path).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns the path segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True for the tree root (no segments).
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the path has no segments (alias for [`is_root`](Self::is_root)).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Returns the parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Returns the final segment, or `None` for the root.
    pub fn last_segment(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns a new path with all of `other`'s segments appended.
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.0.clone();
        segments.extend(other.0.iter().cloned());
        Self(segments)
    }

    /// Consumes the wrapper and returns the inner segments.
    pub fn into_segments(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl From<Vec<String>> for NamespacePath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for NamespacePath {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}
