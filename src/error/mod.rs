//! Error types for contract violations.
//!
//! This module provides [`TransformError`] for a single failed operation and
//! [`TransformErrors`] for accumulating failures across fields.

mod transform_error;

pub use transform_error::{TransformError, TransformErrors};
