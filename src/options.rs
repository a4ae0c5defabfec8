//! Configuration for [`ErrorTransformer`](crate::ErrorTransformer).

use indexmap::IndexSet;

/// Default limit on how deeply containers may nest below a walk's root.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Options controlling how a top-level error mapping is normalized.
///
/// - **preserve_structure_for_keys**: top-level keys whose nested shape is
///   kept; every other key is flattened to one string. Matching is exact and
///   only applies to top-level keys, never to nested ones.
/// - **max_depth**: containers nested deeper than this fail the transformation
///   (default [`DEFAULT_MAX_DEPTH`]).
/// - **parallel**: transform top-level fields on the rayon thread pool. The
///   output is identical either way.
///
/// # Example
///
/// ```rust
/// use formerr::TransformOptions;
///
/// let options = TransformOptions::new()
///     .preserve_keys(["url", "urls"])
///     .with_max_depth(32);
///
/// assert!(options.preserves("urls"));
/// assert!(!options.preserves("tags"));
/// assert_eq!(options.max_depth(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    preserve_structure_for_keys: IndexSet<String>,
    max_depth: usize,
    parallel: bool,
}

impl TransformOptions {
    /// Creates options that flatten every key, with the default depth limit.
    pub fn new() -> Self {
        Self {
            preserve_structure_for_keys: IndexSet::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: false,
        }
    }

    /// Adds a top-level key whose structure should be preserved.
    pub fn preserve_key(mut self, key: impl Into<String>) -> Self {
        self.preserve_structure_for_keys.insert(key.into());
        self
    }

    /// Adds several top-level keys whose structure should be preserved.
    pub fn preserve_keys<K: Into<String>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.preserve_structure_for_keys
            .extend(keys.into_iter().map(Into::into));
        self
    }

    /// Sets the maximum container nesting depth.
    ///
    /// This is the only guard against pathologically deep input. The walks
    /// themselves never recurse, but dropping, cloning or comparing an
    /// [`ErrorNode`](crate::ErrorNode) does, so callers accepting untrusted trees
    /// should keep this limit small and reject deep input before building it.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enables or disables parallel processing of top-level fields.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns true if `key` keeps its nested structure.
    pub fn preserves(&self, key: &str) -> bool {
        self.preserve_structure_for_keys.contains(key)
    }

    /// Returns the keys whose structure is preserved, in insertion order.
    pub fn preserved_keys(&self) -> impl Iterator<Item = &str> {
        self.preserve_structure_for_keys.iter().map(String::as_str)
    }

    /// Returns the maximum container nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns true if top-level fields are processed in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::new()
    }
}
