//! Normalizing error trees for display.
//!
//! This module provides the operations that turn a validation layer's nested
//! error tree into something a UI can print directly:
//! - [`join_error_messages`]: a message list becomes one string
//! - [`flatten_error`]: a whole subtree becomes one deduplicated string
//! - [`process_structured_error`]: shape is kept, message lists collapse
//! - [`transform_errors`]: per top-level field, one of the two above
//!
//! # Example
//!
//! ```rust
//! use formerr::{transform_errors, ErrorNode, TransformOptions};
//! use serde_json::{json, Value};
//!
//! let errors = ErrorNode::from(json!({
//!     "age": ["This field is required", "Only numeric characters are allowed"],
//!     "url": {"site": {"code": ["This site code is invalid"]}},
//! }));
//!
//! let options = TransformOptions::new().preserve_key("url");
//! let result = transform_errors(&errors, &options).unwrap();
//!
//! assert_eq!(Value::from(result), json!({
//!     "age": "This field is required. Only numeric characters are allowed.",
//!     "url": {"site": {"code": "This site code is invalid."}},
//! }));
//! ```

mod flatten;
mod join;
mod structured;

pub use join::{join_error_messages, join_messages};

use indexmap::IndexMap;
use rayon::prelude::*;
use stillwater::Validation;

use crate::error::{TransformError, TransformErrors};
use crate::node::ErrorNode;
use crate::options::{TransformOptions, DEFAULT_MAX_DEPTH};
use crate::path::NodePath;
use crate::TransformValidation;

/// Applies a [`TransformOptions`] policy to top-level error mappings.
///
/// Each top-level field whose value is a container is routed by key: keys
/// listed in `preserve_structure_for_keys` keep their shape (see
/// [`process_structured_error`]), every other key is flattened (see
/// [`flatten_error`]). Fields holding a bare leaf or scalar are dropped.
///
/// The transformer holds no state between calls and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use formerr::{ErrorNode, ErrorTransformer, TransformOptions};
/// use serde_json::{json, Value};
///
/// let transformer = ErrorTransformer::new(TransformOptions::new().preserve_key("urls"));
///
/// let errors = ErrorNode::from(json!({
///     "urls": [{}, {"site": ["Unsupported id"]}],
///     "tags": [{}, {"a": ["Too long"], "b": ["Too long"]}],
///     "stale": "ignored",
/// }));
///
/// let result = transformer.transform(&errors).unwrap();
/// assert_eq!(Value::from(result), json!({
///     "urls": [{}, {"site": "Unsupported id."}],
///     "tags": "Too long.",
/// }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorTransformer {
    options: TransformOptions,
}

impl ErrorTransformer {
    /// Creates a transformer with the given options.
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Returns the options this transformer applies.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transforms a top-level mapping of field errors.
    ///
    /// The result has the same keys in the same order, minus fields whose
    /// value was not a container.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidArgument`] if `errors` is not a
    /// mapping, or the first [`TransformError::DepthExceeded`] in field order.
    #[tracing::instrument(level = "debug", skip_all, fields(
        field_count = errors.as_mapping().map_or(0, IndexMap::len),
        parallel = self.options.parallel(),
    ))]
    pub fn transform(&self, errors: &ErrorNode) -> Result<ErrorNode, TransformError> {
        transform_with(errors, &self.options)
    }

    /// Transforms a top-level mapping, reporting every failing field.
    ///
    /// Unlike [`transform`](Self::transform), a field that fails does not hide
    /// failures in later fields.
    ///
    /// ```rust
    /// use formerr::{ErrorNode, ErrorTransformer, TransformOptions};
    /// use serde_json::json;
    ///
    /// let transformer = ErrorTransformer::new(TransformOptions::new().with_max_depth(1));
    /// let errors = ErrorNode::from(json!({
    ///     "a": [[["too deep"]]],
    ///     "b": ["fine"],
    ///     "c": {"x": {"y": ["too deep"]}},
    /// }));
    ///
    /// let result = transformer.transform_accumulating(&errors);
    /// assert!(result.is_failure());
    /// ```
    #[tracing::instrument(level = "debug", skip_all, fields(
        field_count = errors.as_mapping().map_or(0, IndexMap::len),
    ))]
    pub fn transform_accumulating(&self, errors: &ErrorNode) -> TransformValidation<ErrorNode> {
        let entries = match top_level_entries(errors) {
            Ok(entries) => entries,
            Err(e) => return Validation::Failure(TransformErrors::single(e)),
        };

        let mut output = IndexMap::with_capacity(entries.len());
        let mut failures = Vec::new();
        for (key, result) in transform_fields(entries, &self.options) {
            match result {
                Ok(value) => {
                    output.insert(key.to_string(), value);
                }
                Err(e) => failures.push(e),
            }
        }

        match TransformErrors::from_vec(failures) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(ErrorNode::Mapping(output)),
        }
    }

    /// Flattens a container using this transformer's depth limit.
    ///
    /// See [`flatten_error`].
    pub fn flatten(&self, error: &ErrorNode) -> Result<ErrorNode, TransformError> {
        flatten::flatten(error, NodePath::root(), self.options.max_depth())
    }

    /// Normalizes a tree while keeping its shape, using this transformer's depth limit.
    ///
    /// See [`process_structured_error`].
    pub fn process_structured(&self, error: &ErrorNode) -> Result<ErrorNode, TransformError> {
        structured::process(error, NodePath::root(), self.options.max_depth())
    }
}

fn transform_with(
    errors: &ErrorNode,
    options: &TransformOptions,
) -> Result<ErrorNode, TransformError> {
    let entries = top_level_entries(errors)?;
    transform_fields(entries, options)
        .into_iter()
        .map(|(key, result)| result.map(|value| (key.to_string(), value)))
        .collect::<Result<IndexMap<_, _>, _>>()
        .map(ErrorNode::Mapping)
}

fn top_level_entries(errors: &ErrorNode) -> Result<&IndexMap<String, ErrorNode>, TransformError> {
    errors.as_mapping().ok_or_else(|| {
        TransformError::invalid_argument("transform_errors", "a mapping", errors.kind())
    })
}

/// Transforms every container field, keeping field order.
fn transform_fields<'a>(
    entries: &'a IndexMap<String, ErrorNode>,
    options: &TransformOptions,
) -> Vec<(&'a str, Result<ErrorNode, TransformError>)> {
    let kept: Vec<(&'a str, &'a ErrorNode)> = entries
        .iter()
        .filter(|(key, value)| {
            if value.is_container() {
                true
            } else {
                tracing::debug!(field = %key, kind = %value.kind(), "dropping non-container field");
                false
            }
        })
        .map(|(key, value)| (key.as_str(), value))
        .collect();

    if options.parallel() {
        kept.into_par_iter()
            .map(|(key, value)| (key, transform_field(key, value, options)))
            .collect()
    } else {
        kept.into_iter()
            .map(|(key, value)| (key, transform_field(key, value, options)))
            .collect()
    }
}

fn transform_field(
    key: &str,
    value: &ErrorNode,
    options: &TransformOptions,
) -> Result<ErrorNode, TransformError> {
    let path = NodePath::from_key(key);
    if options.preserves(key) {
        tracing::trace!(field = key, "preserving structure");
        structured::process(value, path, options.max_depth())
    } else {
        tracing::trace!(field = key, "flattening");
        flatten::flatten(value, path, options.max_depth())
    }
}

/// Transforms a top-level mapping of field errors.
///
/// Shorthand for `ErrorTransformer::new(options.clone()).transform(errors)`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] if `errors` is not a mapping,
/// or [`TransformError::DepthExceeded`] if a field nests past the limit.
pub fn transform_errors(
    errors: &ErrorNode,
    options: &TransformOptions,
) -> Result<ErrorNode, TransformError> {
    transform_with(errors, options)
}

/// Collapses a whole subtree into one deduplicated message string.
///
/// Every leaf and scalar at any depth is collected depth-first (sequence
/// elements in order, mapping values in key order), duplicates are dropped
/// keeping the first occurrence, and the survivors are joined. A tree with no
/// terminals comes back as an empty sequence.
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] if `error` is a leaf or scalar,
/// or [`TransformError::DepthExceeded`] past [`DEFAULT_MAX_DEPTH`].
///
/// ```rust
/// use formerr::{flatten_error, ErrorNode};
/// use serde_json::json;
///
/// let error = ErrorNode::from(json!([{"first": ["E"]}, {"last": ["E"]}]));
/// assert_eq!(flatten_error(&error).unwrap(), ErrorNode::leaf("E."));
/// ```
pub fn flatten_error(error: &ErrorNode) -> Result<ErrorNode, TransformError> {
    flatten::flatten(error, NodePath::root(), DEFAULT_MAX_DEPTH)
}

/// Normalizes a tree while keeping its shape.
///
/// A sequence made only of leaves becomes its joined string. Any other
/// mapping or sequence is rebuilt with each child normalized; empty
/// containers stay empty. Leaves and scalars pass through unchanged.
///
/// # Errors
///
/// Returns [`TransformError::DepthExceeded`] past [`DEFAULT_MAX_DEPTH`].
///
/// ```rust
/// use formerr::{process_structured_error, ErrorNode};
/// use serde_json::{json, Value};
///
/// let error = ErrorNode::from(json!([{}, {}, {"site": {"code": ["C"], "id": ["D"]}}]));
/// let result = process_structured_error(&error).unwrap();
/// assert_eq!(
///     Value::from(result),
///     json!([{}, {}, {"site": {"code": "C.", "id": "D."}}])
/// );
/// ```
pub fn process_structured_error(error: &ErrorNode) -> Result<ErrorNode, TransformError> {
    structured::process(error, NodePath::root(), DEFAULT_MAX_DEPTH)
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorTransformer>();
    assert_sync::<ErrorTransformer>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use serde_json::json;

    #[test]
    fn test_transform_rejects_non_mapping() {
        let err = transform_errors(&ErrorNode::from(json!([])), &TransformOptions::new())
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::invalid_argument("transform_errors", "a mapping", NodeKind::Sequence)
        );
    }

    #[test]
    fn test_non_container_fields_dropped() {
        let errors = ErrorNode::from(json!({"a": "x", "b": 1, "c": null, "d": ["y"]}));
        let result = transform_errors(&errors, &TransformOptions::new()).unwrap();
        assert_eq!(result, ErrorNode::mapping([("d", ErrorNode::leaf("y."))]));
    }

    #[test]
    fn test_preserve_applies_to_top_level_only() {
        let errors = ErrorNode::from(json!({"outer": {"url": {"code": ["C"]}}}));
        let options = TransformOptions::new().preserve_key("url");
        let result = transform_errors(&errors, &options).unwrap();
        assert_eq!(result, ErrorNode::mapping([("outer", ErrorNode::leaf("C."))]));
    }

    #[test]
    fn test_field_depth_error_is_rooted_at_key() {
        let errors = ErrorNode::from(json!({"ok": ["a"], "deep": [[["x"]]]}));
        let options = TransformOptions::new().with_max_depth(1);
        let err = transform_errors(&errors, &options).unwrap_err();
        assert_eq!(err.field(), Some("deep"));
    }

    #[test]
    fn test_transformer_matches_free_function() {
        let errors = ErrorNode::from(json!({"x": [{}, {"a": ["1"]}], "y": {"b": ["2", "2"]}}));
        let options = TransformOptions::new().preserve_key("x");
        let transformer = ErrorTransformer::new(options.clone());
        assert_eq!(
            transformer.transform(&errors).unwrap(),
            transform_errors(&errors, &options).unwrap()
        );
    }

    #[test]
    fn test_accumulating_collects_every_failure() {
        let errors = ErrorNode::from(json!({
            "a": [[["x"]]],
            "b": ["fine"],
            "c": {"x": {"y": ["z"]}},
        }));
        let transformer = ErrorTransformer::new(TransformOptions::new().with_max_depth(1));

        match transformer.transform_accumulating(&errors) {
            Validation::Failure(errors) => {
                let fields: Vec<_> = errors.iter().filter_map(TransformError::field).collect();
                assert_eq!(fields, vec!["a", "c"]);
            }
            Validation::Success(_) => panic!("Expected failure"),
        }
    }

    #[test]
    fn test_accumulating_success_matches_transform() {
        let errors = ErrorNode::from(json!({"a": ["x"], "b": [{}, {"c": ["y"]}]}));
        let transformer = ErrorTransformer::default();

        match transformer.transform_accumulating(&errors) {
            Validation::Success(result) => {
                assert_eq!(result, transformer.transform(&errors).unwrap());
            }
            Validation::Failure(_) => panic!("Expected success"),
        }
    }

    #[test]
    fn test_accumulating_rejects_non_mapping() {
        let transformer = ErrorTransformer::default();
        let result = transformer.transform_accumulating(&ErrorNode::leaf("x"));
        assert!(result.is_failure());
    }
}
