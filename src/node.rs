//! The error tree produced by a validation layer.
//!
//! This module provides [`ErrorNode`], the recursive value this crate
//! normalizes, together with [`Scalar`] for non-string terminals and
//! [`NodeKind`] for naming a node's tag in diagnostics.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

/// A non-string terminal value found in an error tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, kept in its JSON representation.
    Number(Number),
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
        }
    }
}

/// The tag of an [`ErrorNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A string message.
    Leaf,
    /// A non-string terminal.
    Scalar,
    /// An ordered list of nodes.
    Sequence,
    /// A keyed collection of nodes.
    Mapping,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Leaf => "leaf",
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// A structured validation error.
///
/// Error trees mix mappings (field name to error) and sequences (one entry per
/// failure, or one entry per item of a repeated input) down to string leaves.
/// Empty containers are meaningful: an empty mapping inside a sequence says
/// "this item has no errors" and is kept as-is by every operation.
///
/// Mapping equality ignores key order; traversal always follows insertion order.
///
/// The derived `Clone`, `PartialEq` and `Drop`, and the conversions to and from
/// `serde_json::Value`, recurse once per nesting level. Only the transformation
/// walks are iterative, and [`TransformOptions::with_max_depth`](crate::TransformOptions::with_max_depth)
/// bounds what they accept, not what callers can build.
///
/// # Example
///
/// ```rust
/// use formerr::ErrorNode;
/// use serde_json::json;
///
/// let node = ErrorNode::from(json!({
///     "name": ["This field is required"],
///     "urls": [{}, {"site": ["Unsupported id"]}],
/// }));
///
/// assert!(node.is_mapping());
/// assert_eq!(node.get("name"), Some(&ErrorNode::sequence([ErrorNode::leaf("This field is required")])));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    /// A terminal error message.
    Leaf(String),
    /// A terminal that is not a string.
    Scalar(Scalar),
    /// An ordered list of errors.
    Sequence(Vec<ErrorNode>),
    /// Per-key errors, in insertion order.
    Mapping(IndexMap<String, ErrorNode>),
}

impl ErrorNode {
    /// Creates a leaf message.
    pub fn leaf(message: impl Into<String>) -> Self {
        ErrorNode::Leaf(message.into())
    }

    /// Creates a sequence from the given nodes.
    pub fn sequence(items: impl IntoIterator<Item = ErrorNode>) -> Self {
        ErrorNode::Sequence(items.into_iter().collect())
    }

    /// Creates a mapping from key/node pairs. Later duplicates replace earlier values.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, ErrorNode)>) -> Self {
        ErrorNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates a sequence of leaf messages.
    pub fn messages<S: Into<String>>(messages: impl IntoIterator<Item = S>) -> Self {
        ErrorNode::Sequence(messages.into_iter().map(ErrorNode::leaf).collect())
    }

    /// An empty sequence.
    pub fn empty_sequence() -> Self {
        ErrorNode::Sequence(Vec::new())
    }

    /// An empty mapping.
    pub fn empty_mapping() -> Self {
        ErrorNode::Mapping(IndexMap::new())
    }

    /// Returns the tag of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            ErrorNode::Leaf(_) => NodeKind::Leaf,
            ErrorNode::Scalar(_) => NodeKind::Scalar,
            ErrorNode::Sequence(_) => NodeKind::Sequence,
            ErrorNode::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Returns true for sequences and mappings.
    pub fn is_container(&self) -> bool {
        matches!(self, ErrorNode::Sequence(_) | ErrorNode::Mapping(_))
    }

    /// Returns true for leaves and scalars.
    pub fn is_terminal(&self) -> bool {
        !self.is_container()
    }

    /// Returns true if this is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, ErrorNode::Mapping(_))
    }

    /// Returns true if this is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, ErrorNode::Sequence(_))
    }

    /// Returns true if this is a sequence whose every element is a leaf.
    ///
    /// An empty sequence is a message list.
    pub fn is_message_list(&self) -> bool {
        match self {
            ErrorNode::Sequence(items) => items.iter().all(|n| matches!(n, ErrorNode::Leaf(_))),
            _ => false,
        }
    }

    /// Returns the message of a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            ErrorNode::Leaf(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements of a sequence.
    pub fn as_sequence(&self) -> Option<&[ErrorNode]> {
        match self {
            ErrorNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a mapping.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, ErrorNode>> {
        match self {
            ErrorNode::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a key in a mapping. Returns `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Renders a terminal the way it appears in a joined message.
    ///
    /// Returns `None` for containers.
    pub fn render_terminal(&self) -> Option<String> {
        match self {
            ErrorNode::Leaf(s) => Some(s.clone()),
            ErrorNode::Scalar(s) => Some(s.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for ErrorNode {
    fn from(message: &str) -> Self {
        ErrorNode::leaf(message)
    }
}

impl From<String> for ErrorNode {
    fn from(message: String) -> Self {
        ErrorNode::Leaf(message)
    }
}

impl From<Vec<ErrorNode>> for ErrorNode {
    fn from(items: Vec<ErrorNode>) -> Self {
        ErrorNode::Sequence(items)
    }
}

impl From<IndexMap<String, ErrorNode>> for ErrorNode {
    fn from(entries: IndexMap<String, ErrorNode>) -> Self {
        ErrorNode::Mapping(entries)
    }
}

impl From<Value> for ErrorNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ErrorNode::Scalar(Scalar::Null),
            Value::Bool(b) => ErrorNode::Scalar(Scalar::Bool(b)),
            Value::Number(n) => ErrorNode::Scalar(Scalar::Number(n)),
            Value::String(s) => ErrorNode::Leaf(s),
            Value::Array(items) => {
                ErrorNode::Sequence(items.into_iter().map(ErrorNode::from).collect())
            }
            Value::Object(entries) => ErrorNode::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, ErrorNode::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ErrorNode> for Value {
    fn from(node: ErrorNode) -> Self {
        match node {
            ErrorNode::Leaf(s) => Value::String(s),
            ErrorNode::Scalar(Scalar::Null) => Value::Null,
            ErrorNode::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            ErrorNode::Scalar(Scalar::Number(n)) => Value::Number(n),
            ErrorNode::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            ErrorNode::Mapping(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorNode>();
    assert_sync::<ErrorNode>();
};
