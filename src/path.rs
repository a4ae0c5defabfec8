//! Where a traversal stopped inside an error tree.

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Key(String),
    Index(usize),
}

/// The location of a node, written the way form field errors are addressed:
/// `urls[2].site.code`.
///
/// Paths reported by the transformer start at the top-level field.
///
/// ```rust
/// use formerr::NodePath;
///
/// let path = NodePath::from_key("urls").index(2).key("site");
/// assert_eq!(path.to_string(), "urls[2].site");
/// assert_eq!(path.field(), Some("urls"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<Segment>);

impl NodePath {
    /// The location of the node a walk started from.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path rooted at a top-level field.
    pub fn from_key(field: impl Into<String>) -> Self {
        Self(vec![Segment::Key(field.into())])
    }

    /// Steps into a mapping value.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(Segment::Key(key.into()));
        self
    }

    /// Steps into a sequence element.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(Segment::Index(index));
        self
    }

    /// The top-level field this path starts with, if it starts with a key.
    pub fn field(&self) -> Option<&str> {
        match self.0.first()? {
            Segment::Key(key) => Some(key.as_str()),
            Segment::Index(_) => None,
        }
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.0.iter();
        match segments.next() {
            None => return f.write_str("(root)"),
            Some(Segment::Key(key)) => f.write_str(key)?,
            Some(Segment::Index(index)) => write!(f, "[{}]", index)?,
        }
        for segment in segments {
            match segment {
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        assert_eq!(NodePath::root().to_string(), "(root)");
        assert_eq!(NodePath::root().field(), None);
    }

    #[test]
    fn test_row_path() {
        let path = NodePath::from_key("tags").index(3).key("non_field_errors");
        assert_eq!(path.to_string(), "tags[3].non_field_errors");
        assert_eq!(path.field(), Some("tags"));
    }

    #[test]
    fn test_index_first_has_no_field() {
        let path = NodePath::root().index(0).key("site");
        assert_eq!(path.to_string(), "[0].site");
        assert_eq!(path.field(), None);
    }
}
