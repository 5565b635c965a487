//! Locations inside an input record.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step from a record into one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field of a record.
    Key(String),
    /// An item of a sequence.
    Index(usize),
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Key(key) => serializer.serialize_str(key),
            Self::Index(index) => serializer.serialize_u64(*index as u64),
        }
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

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Ordered field names and sequence indices from the root record.
///
/// The empty path is the root itself and displays as `$`.
///
/// ```
/// use contour_schema::FieldPath;
///
/// let path = FieldPath::root().key("user").key("items").index(0).key("name");
/// assert_eq!(path.to_string(), "user.items[0].name");
/// assert_eq!(FieldPath::root().to_string(), "$");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The root path.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Extends the path by a field name.
    #[must_use = "builder methods must be chained or built"]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(key.into()));
        self
    }

    /// Extends the path by a sequence index.
    #[must_use = "builder methods must be chained or built"]
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    /// The segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `prefix` is this path or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// The first `len` segments.
    #[must_use]
    pub fn truncated(&self, len: usize) -> Self {
        Self(self.0.iter().take(len).cloned().collect())
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl From<&[PathSegment]> for FieldPath {
    fn from(segments: &[PathSegment]) -> Self {
        Self(segments.to_vec())
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display() {
        assert_eq!(FieldPath::root().key("a").to_string(), "a");
        assert_eq!(FieldPath::root().key("a").key("b").to_string(), "a.b");
        assert_eq!(FieldPath::root().key("tags").index(2).to_string(), "tags[2]");
        assert_eq!(FieldPath::root().index(0).key("x").to_string(), "[0].x");
    }

    #[test]
    fn serializes_as_segment_list() {
        let path = FieldPath::root().key("user").index(1);
        assert_eq!(
            serde_json::to_value(&path).unwrap(),
            serde_json::json!(["user", 1])
        );
    }

    #[test]
    fn prefixes() {
        let path = FieldPath::root().key("user").key("address").key("zip");
        assert!(path.starts_with(&FieldPath::root()));
        assert!(path.starts_with(&FieldPath::root().key("user")));
        assert!(!path.starts_with(&FieldPath::root().key("address")));
        assert_eq!(path.truncated(1), FieldPath::root().key("user"));
    }
}
