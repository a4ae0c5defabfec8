//! Collapsing a whole error tree into one deduplicated message string.

use indexmap::IndexSet;

use crate::error::TransformError;
use crate::node::ErrorNode;
use crate::path::NodePath;
use crate::walk::Walk;

use super::join::joined_node;

/// A terminal's raw value, compared before any period is appended.
///
/// A leaf `"1"` and the number `1` are different values.
#[derive(PartialEq, Eq, Hash)]
enum Terminal<'a> {
    Text(&'a str),
    Scalar(String),
}

impl Terminal<'_> {
    fn as_str(&self) -> &str {
        match self {
            Terminal::Text(s) => s,
            Terminal::Scalar(s) => s,
        }
    }
}

/// Flattens `error` into a single joined leaf, or an empty sequence if it has no terminals.
///
/// Terminals are gathered depth-first, children in their natural order, then
/// deduplicated keeping first occurrences. `path` prefixes locations reported
/// in depth errors.
pub(crate) fn flatten(
    error: &ErrorNode,
    path: NodePath,
    max_depth: usize,
) -> Result<ErrorNode, TransformError> {
    if !error.is_container() {
        return Err(TransformError::invalid_argument(
            "flatten_error",
            "a mapping or a sequence",
            error.kind(),
        ));
    }

    let mut seen: IndexSet<Terminal<'_>> = IndexSet::new();
    let mut walk = Walk::new(path, max_depth);
    let mut stack = vec![walk.root(error)];

    while let Some(frame) = stack.pop() {
        match frame.node {
            ErrorNode::Leaf(message) => {
                seen.insert(Terminal::Text(message));
            }
            ErrorNode::Scalar(scalar) => {
                seen.insert(Terminal::Scalar(scalar.to_string()));
            }
            ErrorNode::Sequence(items) => {
                walk.check_depth(&frame)?;
                // Reversed so the first child is popped first.
                for (i, item) in items.iter().enumerate().rev() {
                    stack.push(walk.index(&frame, i, item));
                }
            }
            ErrorNode::Mapping(entries) => {
                walk.check_depth(&frame)?;
                for (key, value) in entries.iter().rev() {
                    stack.push(walk.key(&frame, key, value));
                }
            }
        }
    }

    let messages: Vec<&str> = seen.iter().map(Terminal::as_str).collect();
    Ok(joined_node(&messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use serde_json::json;

    fn flat(value: serde_json::Value) -> ErrorNode {
        flatten(&ErrorNode::from(value), NodePath::root(), 100).unwrap()
    }

    #[test]
    fn test_depth_first_order() {
        assert_eq!(
            flat(json!({"a": ["1", {"b": ["2"]}, "3"], "c": ["4"]})),
            ErrorNode::leaf("1. 2. 3. 4.")
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(flat(json!(["B", "A", "B", "C", "A"])), ErrorNode::leaf("B. A. C."));
    }

    #[test]
    fn test_dedup_before_period() {
        assert_eq!(flat(json!(["A", "A."])), ErrorNode::leaf("A. A.."));
    }

    #[test]
    fn test_string_and_number_are_distinct() {
        assert_eq!(flat(json!(["1", 1, 1])), ErrorNode::leaf("1. 1."));
    }

    #[test]
    fn test_only_empty_containers() {
        assert_eq!(flat(json!([{}, [], {"a": []}])), ErrorNode::empty_sequence());
    }

    #[test]
    fn test_rejects_scalar() {
        let err = flatten(&ErrorNode::from(json!(3)), NodePath::root(), 100).unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidArgument {
                got: NodeKind::Scalar,
                ..
            }
        ));
    }

    #[test]
    fn test_depth_limit_reports_path() {
        let err = flatten(
            &ErrorNode::from(json!([{}, {"a": [["deep"]]}])),
            NodePath::from_key("tags"),
            2,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransformError::DepthExceeded {
                path: NodePath::from_key("tags").index(1).key("a").index(0),
                max_depth: 2,
            }
        );
    }

    #[test]
    fn test_terminals_do_not_count_toward_depth() {
        let result = flatten(&ErrorNode::from(json!(["x"])), NodePath::root(), 0);
        assert_eq!(result, Ok(ErrorNode::leaf("x.")));
    }
}
