//! Joining a list of messages into one display string.

use crate::error::TransformError;
use crate::node::ErrorNode;

/// Joins messages into a single sentence-per-message string.
///
/// Every message gets a trailing period and messages are separated by one
/// space, in input order. Returns `None` for an empty slice rather than an
/// empty string.
///
/// ```rust
/// use formerr::join_messages;
///
/// assert_eq!(join_messages(&["A", "B"]), Some("A. B.".to_string()));
/// assert_eq!(join_messages::<&str>(&[]), None);
/// ```
pub fn join_messages<S: AsRef<str>>(messages: &[S]) -> Option<String> {
    if messages.is_empty() {
        return None;
    }

    let capacity = messages.iter().map(|m| m.as_ref().len() + 2).sum();
    let mut joined = String::with_capacity(capacity);
    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        joined.push_str(message.as_ref());
        joined.push('.');
    }
    Some(joined)
}

/// Joins a sequence of terminal nodes into a leaf.
///
/// An empty sequence comes back as an empty sequence. Scalars are rendered
/// (`1`, `true`, `null`) before joining.
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] if `list` is not a sequence, or
/// if any element is itself a container.
///
/// ```rust
/// use formerr::{join_error_messages, ErrorNode};
///
/// let joined = join_error_messages(&ErrorNode::messages(["A", "B"])).unwrap();
/// assert_eq!(joined, ErrorNode::leaf("A. B."));
///
/// let empty = join_error_messages(&ErrorNode::empty_sequence()).unwrap();
/// assert_eq!(empty, ErrorNode::empty_sequence());
/// ```
pub fn join_error_messages(list: &ErrorNode) -> Result<ErrorNode, TransformError> {
    const OPERATION: &str = "join_error_messages";

    let items = list
        .as_sequence()
        .ok_or_else(|| TransformError::invalid_argument(OPERATION, "a sequence", list.kind()))?;

    let rendered = items
        .iter()
        .map(|item| {
            item.render_terminal().ok_or_else(|| {
                TransformError::invalid_argument(
                    OPERATION,
                    "a sequence of leaves or scalars",
                    item.kind(),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(joined_node(&rendered))
}

/// Wraps [`join_messages`], keeping emptiness as an empty sequence.
pub(crate) fn joined_node<S: AsRef<str>>(messages: &[S]) -> ErrorNode {
    match join_messages(messages) {
        Some(joined) => ErrorNode::Leaf(joined),
        None => ErrorNode::empty_sequence(),
    }
}
