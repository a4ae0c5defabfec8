//! # Formerr
//!
//! Normalizes the nested error trees produced by form validation into a shape
//! a UI can display directly.
//!
//! ## Overview
//!
//! Validation layers report errors as trees: mappings of field name to error,
//! sequences with one entry per failure or per item of a repeated input, and
//! string messages at the leaves. Most fields only need one readable sentence,
//! so their whole subtree is flattened into deduplicated, period-terminated
//! messages. Fields rendered as per-item sub-forms keep their shape instead,
//! with only their innermost message lists collapsed.
//!
//! ## Core Types
//!
//! - [`ErrorNode`]: The error tree (leaf, scalar, sequence or mapping)
//! - [`TransformOptions`]: Which top-level keys keep their structure, and traversal limits
//! - [`ErrorTransformer`]: Applies the options to a top-level error mapping
//! - [`TransformError`]: A caller contract violation
//!
//! ## Example
//!
//! ```rust
//! use formerr::{transform_errors, ErrorNode, TransformOptions};
//! use serde_json::{json, Value};
//!
//! let errors = ErrorNode::from(json!({
//!     "name": ["This field is required"],
//!     "urls": [{}, {"site": {"code": ["This site code is invalid"]}}],
//!     "tags": [{}, {"a": ["Only alphanumeric characters are allowed"]},
//!              {"b": ["Only alphanumeric characters are allowed"]}],
//! }));
//!
//! let options = TransformOptions::new().preserve_key("urls");
//! let result = transform_errors(&errors, &options).unwrap();
//!
//! assert_eq!(Value::from(result), json!({
//!     "name": "This field is required.",
//!     "urls": [{}, {"site": {"code": "This site code is invalid."}}],
//!     "tags": "Only alphanumeric characters are allowed.",
//! }));
//! ```

pub mod error;
pub mod node;
pub mod options;
pub mod path;
pub mod transform;

mod walk;

pub use error::{TransformError, TransformErrors};
pub use node::{ErrorNode, NodeKind, Scalar};
pub use options::{TransformOptions, DEFAULT_MAX_DEPTH};
pub use path::NodePath;
pub use transform::{
    flatten_error, join_error_messages, join_messages, process_structured_error,
    transform_errors, ErrorTransformer,
};

/// Type alias for transformations that accumulate every failure.
pub type TransformValidation<T> = stillwater::Validation<T, TransformErrors>;
