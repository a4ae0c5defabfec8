//! Work-stack bookkeeping shared by the tree walkers.
//!
//! Both walkers keep pending nodes on an explicit stack instead of recursing,
//! so stack usage stays flat and the depth limit is a plain comparison. Each
//! [`Frame`] records its depth and a link into the walk's path arena; the
//! full [`NodePath`] is only rebuilt when a failure has to be reported.

use crate::error::TransformError;
use crate::node::ErrorNode;
use crate::path::NodePath;

enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

struct Link<'a> {
    parent: Option<usize>,
    step: Step<'a>,
}

/// A pending node together with its depth and location.
pub(crate) struct Frame<'a> {
    pub(crate) node: &'a ErrorNode,
    depth: usize,
    link: Option<usize>,
}

/// State of one traversal: the path arena and the depth limit.
pub(crate) struct Walk<'a> {
    base: NodePath,
    links: Vec<Link<'a>>,
    max_depth: usize,
}

impl<'a> Walk<'a> {
    /// Starts a walk. `base` prefixes every reported location.
    pub(crate) fn new(base: NodePath, max_depth: usize) -> Self {
        Self {
            base,
            links: Vec::new(),
            max_depth,
        }
    }

    /// The starting frame of the walk.
    pub(crate) fn root(&self, node: &'a ErrorNode) -> Frame<'a> {
        Frame {
            node,
            depth: 0,
            link: None,
        }
    }

    /// Frame for the element at `index` of `parent`'s sequence.
    pub(crate) fn index(&mut self, parent: &Frame<'a>, index: usize, node: &'a ErrorNode) -> Frame<'a> {
        self.child(parent, Step::Index(index), node)
    }

    /// Frame for the value under `key` of `parent`'s mapping.
    pub(crate) fn key(&mut self, parent: &Frame<'a>, key: &'a str, node: &'a ErrorNode) -> Frame<'a> {
        self.child(parent, Step::Key(key), node)
    }

    fn child(&mut self, parent: &Frame<'a>, step: Step<'a>, node: &'a ErrorNode) -> Frame<'a> {
        self.links.push(Link {
            parent: parent.link,
            step,
        });
        Frame {
            node,
            depth: parent.depth + 1,
            link: Some(self.links.len() - 1),
        }
    }

    /// Fails when a container sits deeper than the limit.
    ///
    /// Only containers are checked; a terminal never extends the nesting.
    pub(crate) fn check_depth(&self, frame: &Frame<'a>) -> Result<(), TransformError> {
        if frame.depth > self.max_depth {
            let path = self.path_of(frame);
            tracing::warn!(%path, max_depth = self.max_depth, "error tree nested too deeply");
            return Err(TransformError::DepthExceeded {
                path,
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    /// Rebuilds the location of `frame`.
    pub(crate) fn path_of(&self, frame: &Frame<'a>) -> NodePath {
        let mut steps = Vec::with_capacity(frame.depth);
        let mut cursor = frame.link;
        while let Some(i) = cursor {
            let link = &self.links[i];
            steps.push(&link.step);
            cursor = link.parent;
        }

        steps
            .into_iter()
            .rev()
            .fold(self.base.clone(), |path, step| match step {
                Step::Key(key) => path.key(*key),
                Step::Index(index) => path.index(*index),
            })
    }
}
