//! Transformation error types.
//!
//! This module provides [`TransformError`] for structural precondition
//! failures and [`TransformErrors`] for accumulating them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::node::NodeKind;
use crate::path::NodePath;

/// A structural precondition was violated by the caller.
///
/// Both variants signal an integration defect: the producer of the error tree
/// handed over something this crate cannot normalize. They are returned to the
/// caller unchanged and never recovered from internally.
///
/// # Example
///
/// ```rust
/// use formerr::{flatten_error, ErrorNode, NodeKind, TransformError};
///
/// let err = flatten_error(&ErrorNode::leaf("oops")).unwrap_err();
/// assert_eq!(
///     err,
///     TransformError::InvalidArgument {
///         operation: "flatten_error",
///         expected: "a mapping or a sequence",
///         got: NodeKind::Leaf,
///     }
/// );
/// assert!(err.is_invalid_argument());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// An operation received a node of the wrong kind.
    #[error("{operation}: expected {expected}, got {got}")]
    InvalidArgument {
        /// The operation whose precondition failed.
        operation: &'static str,
        /// What the operation accepts.
        expected: &'static str,
        /// The kind of node it received.
        got: NodeKind,
    },

    /// A node lies deeper than the configured limit.
    #[error("{path}: nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        /// Location of the first node past the limit.
        path: NodePath,
        /// The limit in effect.
        max_depth: usize,
    },
}

impl TransformError {
    pub(crate) fn invalid_argument(
        operation: &'static str,
        expected: &'static str,
        got: NodeKind,
    ) -> Self {
        TransformError::InvalidArgument {
            operation,
            expected,
            got,
        }
    }

    /// Returns true for every variant: all of them are caller contract violations.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            TransformError::InvalidArgument { .. } | TransformError::DepthExceeded { .. }
        )
    }

    /// Returns the location of the failure, if it has one.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            TransformError::DepthExceeded { path, .. } => Some(path),
            TransformError::InvalidArgument { .. } => None,
        }
    }

    /// Returns the top-level key the failure occurred under, if any.
    pub fn field(&self) -> Option<&str> {
        self.path()?.field()
    }
}

/// A non-empty collection of transformation errors.
///
/// Returned by [`ErrorTransformer::transform_accumulating`](crate::ErrorTransformer::transform_accumulating)
/// so that every failing field is reported at once. Implements `Semigroup` so
/// per-field failures combine in field order.
///
/// ```rust
/// use formerr::{NodePath, TransformError, TransformErrors};
/// use stillwater::prelude::*;
///
/// let a = TransformErrors::single(TransformError::DepthExceeded {
///     path: NodePath::from_key("urls"),
///     max_depth: 1,
/// });
/// let b = TransformErrors::single(TransformError::DepthExceeded {
///     path: NodePath::from_key("tags"),
///     max_depth: 1,
/// });
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransformErrors(NonEmptyVec<TransformError>);

impl TransformErrors {
    /// Creates a collection holding a single error.
    pub fn single(error: TransformError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a `NonEmptyVec` of errors.
    pub fn from_non_empty(errors: NonEmptyVec<TransformError>) -> Self {
        Self(errors)
    }

    /// Creates a collection from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<TransformError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        Some(errors.fold(Self::single(first), |acc, e| acc.combine(Self::single(e))))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &TransformError> {
        self.0.iter()
    }

    /// Returns the errors raised under the given top-level key.
    pub fn for_field(&self, key: &str) -> Vec<&TransformError> {
        self.0.iter().filter(|e| e.field() == Some(key)).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &TransformError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<TransformError>`.
    pub fn into_vec(self) -> Vec<TransformError> {
        self.0.into_vec()
    }
}

impl Semigroup for TransformErrors {
    fn combine(self, other: Self) -> Self {
        TransformErrors(self.0.combine(other.0))
    }
}

impl From<TransformError> for TransformErrors {
    fn from(error: TransformError) -> Self {
        Self::single(error)
    }
}

impl Display for TransformErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transformation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for TransformErrors {}

impl IntoIterator for TransformErrors {
    type Item = TransformError;
    type IntoIter = std::vec::IntoIter<TransformError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<TransformError>();
    assert_sync::<TransformError>();
    assert_send::<TransformErrors>();
    assert_sync::<TransformErrors>();
};
