//! Facet path syntax
//!
//! A facet path is a separator-joined sequence of non-empty segments, e.g.
//! `style:gucci:handbag`. Every proper prefix of a path is one of its
//! ancestors; `self_and_ancestors` is the set a document is posted under
//! when it is indexed with the path.
//!
//! Ancestor computation is purely syntactic. Whether a prefix was declared
//! in the configured hierarchy does not matter here.

use thiserror::Error;

/// Default segment separator
pub const DEFAULT_SEPARATOR: char = ':';

/// Default maximum number of segments in a path
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default maximum path length in bytes
pub const DEFAULT_MAX_TERM_BYTES: usize = 1024;

/// Reasons a facet path is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path is the empty string
    #[error("facet path is empty")]
    Empty,

    /// A segment is empty (leading, trailing or doubled separator)
    #[error("empty segment at position {position}")]
    EmptySegment {
        /// Zero-based segment index
        position: usize,
    },

    /// A segment passed to `join` contains the separator
    #[error("segment at position {position} contains the separator")]
    SeparatorInSegment {
        /// Zero-based segment index
        position: usize,
    },

    /// Too many segments
    #[error("facet path has {actual} segments, maximum is {max}")]
    TooDeep {
        /// Segment count of the rejected path
        actual: usize,
        /// Configured maximum
        max: usize,
    },

    /// Path exceeds the byte limit
    #[error("facet path is {actual} bytes, maximum is {max}")]
    TooLong {
        /// Length of the rejected path in bytes
        actual: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Separator and size limits for facet paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetSyntax {
    separator: char,
    max_depth: usize,
    max_term_bytes: usize,
}

impl Default for FacetSyntax {
    fn default() -> Self {
        FacetSyntax {
            separator: DEFAULT_SEPARATOR,
            max_depth: DEFAULT_MAX_DEPTH,
            max_term_bytes: DEFAULT_MAX_TERM_BYTES,
        }
    }
}

impl FacetSyntax {
    /// Syntax with the given separator and default limits
    pub fn new(separator: char) -> Self {
        FacetSyntax {
            separator,
            ..Default::default()
        }
    }

    /// Override the size limits
    pub fn with_limits(mut self, max_depth: usize, max_term_bytes: usize) -> Self {
        self.max_depth = max_depth;
        self.max_term_bytes = max_term_bytes;
        self
    }

    /// The segment separator
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Maximum number of segments
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Maximum path length in bytes
    pub fn max_term_bytes(&self) -> usize {
        self.max_term_bytes
    }

    /// Check that `path` is well formed and within limits
    ///
    /// Returns the path unchanged on success so callers can chain it.
    pub fn validate<'a>(&self, path: &'a str) -> Result<&'a str, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.len() > self.max_term_bytes {
            return Err(PathError::TooLong {
                actual: path.len(),
                max: self.max_term_bytes,
            });
        }

        let mut depth = 0;
        for (position, segment) in path.split(self.separator).enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment { position });
            }
            depth += 1;
        }
        if depth > self.max_depth {
            return Err(PathError::TooDeep {
                actual: depth,
                max: self.max_depth,
            });
        }
        Ok(path)
    }

    /// Every prefix of `path`, shortest first, ending with `path` itself
    ///
    /// `style:gucci:handbag` yields `style`, `style:gucci`, `style:gucci:handbag`.
    pub fn self_and_ancestors<'a>(&self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        path.match_indices(self.separator)
            .map(move |(end, _)| &path[..end])
            .chain(std::iter::once(path))
    }

    /// Direct parent, or `None` for a top-level path
    pub fn parent<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.rsplit_once(self.separator).map(|(parent, _)| parent)
    }

    /// Number of segments
    pub fn depth(&self, path: &str) -> usize {
        path.matches(self.separator).count() + 1
    }

    /// Split a path into its segments
    pub fn segments<'a>(&self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        path.split(self.separator)
    }

    /// Build a validated path from segments
    pub fn join(&self, segments: &[&str]) -> Result<String, PathError> {
        if let Some(position) = segments.iter().position(|s| s.contains(self.separator)) {
            return Err(PathError::SeparatorInSegment { position });
        }
        let mut buf = [0u8; 4];
        let separator: &str = self.separator.encode_utf8(&mut buf);
        let path = segments.join(separator);
        self.validate(&path)?;
        Ok(path)
    }
}
