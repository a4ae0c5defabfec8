//! Structure-preserving normalization.
//!
//! Every message list collapses to its joined string; every other container
//! keeps its shape with its children normalized in turn.

use indexmap::IndexMap;

use crate::error::TransformError;
use crate::node::ErrorNode;
use crate::path::NodePath;
use crate::walk::{Frame, Walk};

use super::join::joined_node;

enum Task<'a> {
    /// Normalize a node and push its result onto the output stack.
    Visit(Frame<'a>),
    /// Pop `len` results and push them back as one sequence.
    AssembleSequence(usize),
    /// Pop one result per key and push them back as one mapping.
    AssembleMapping(Vec<&'a str>),
}

/// Normalizes `error` while keeping its shape.
///
/// Children are visited before their parent is assembled, so the output stack
/// always holds a container's normalized children in order, on top.
pub(crate) fn process(
    error: &ErrorNode,
    path: NodePath,
    max_depth: usize,
) -> Result<ErrorNode, TransformError> {
    let mut walk = Walk::new(path, max_depth);
    let mut tasks = vec![Task::Visit(walk.root(error))];
    let mut output: Vec<ErrorNode> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Visit(frame) => match frame.node {
                ErrorNode::Sequence(items) if frame.node.is_message_list() => {
                    walk.check_depth(&frame)?;
                    let messages: Vec<&str> = items.iter().filter_map(ErrorNode::as_leaf).collect();
                    output.push(joined_node(&messages));
                }
                ErrorNode::Sequence(items) => {
                    walk.check_depth(&frame)?;
                    tasks.push(Task::AssembleSequence(items.len()));
                    for (i, item) in items.iter().enumerate().rev() {
                        tasks.push(Task::Visit(walk.index(&frame, i, item)));
                    }
                }
                ErrorNode::Mapping(entries) => {
                    walk.check_depth(&frame)?;
                    tasks.push(Task::AssembleMapping(
                        entries.keys().map(String::as_str).collect(),
                    ));
                    for (key, value) in entries.iter().rev() {
                        tasks.push(Task::Visit(walk.key(&frame, key, value)));
                    }
                }
                terminal => output.push(terminal.clone()),
            },
            Task::AssembleSequence(len) => {
                let items = output.split_off(output.len() - len);
                output.push(ErrorNode::Sequence(items));
            }
            Task::AssembleMapping(keys) => {
                let values = output.split_off(output.len() - keys.len());
                let entries: IndexMap<String, ErrorNode> = keys
                    .into_iter()
                    .map(String::from)
                    .zip(values)
                    .collect();
                output.push(ErrorNode::Mapping(entries));
            }
        }
    }

    let Some(result) = output.pop() else {
        unreachable!("the root visit always pushes one result");
    };
    debug_assert!(output.is_empty());
    Ok(result)
}
