use std::slice;

use crate::error::{MalformedReason, TreeError};
use crate::node::node_model::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkLimits {
    pub max_depth: usize,
    pub max_nodes: usize,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_nodes: 10_000,
        }
    }
}

/// One node reached by the walker.
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    pub node: &'a Node,
    pub depth: usize,
    /// Nodes from the root down to the parent, root first.
    pub ancestors: Vec<&'a Node>,
}

struct Frame<'a> {
    node: &'a Node,
    children: slice::Iter<'a, Node>,
}

/// Lazy pre-order traversal: parent before children, siblings in host order.
///
/// Keeps an explicit stack of child iterators instead of indexing into child
/// lists, so the only way to make progress is to consume an iterator. The
/// stack height is the current depth and is checked against `max_depth`
/// before a frame is pushed. Yields at most one error, then stops.
pub struct TreeWalker<'a> {
    root: Option<&'a Node>,
    stack: Vec<Frame<'a>>,
    visited: usize,
    limits: WalkLimits,
    done: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: &'a Node, limits: WalkLimits) -> Self {
        Self {
            root: Some(root),
            stack: Vec::new(),
            visited: 0,
            limits,
            done: false,
        }
    }

    fn enter(&mut self, node: &'a Node) -> Result<Visit<'a>, TreeError> {
        let depth = self.stack.len();

        if self.stack.iter().any(|f| f.node.address == node.address) {
            return Err(malformed(MalformedReason::Cycle, node));
        }
        if depth > self.limits.max_depth {
            return Err(malformed(MalformedReason::TooDeep, node));
        }
        self.visited += 1;
        if self.visited > self.limits.max_nodes {
            return Err(malformed(MalformedReason::TooManyNodes, node));
        }

        let ancestors = self.stack.iter().map(|f| f.node).collect();
        self.stack.push(Frame {
            node,
            children: node.children.iter(),
        });

        Ok(Visit {
            node,
            depth,
            ancestors,
        })
    }
}

fn malformed(reason: MalformedReason, node: &Node) -> TreeError {
    TreeError::MalformedTree {
        reason,
        address: node.address.clone(),
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = Result<Visit<'a>, TreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next_node = match self.root.take() {
            Some(root) => Some(root),
            None => loop {
                let top = match self.stack.last_mut() {
                    Some(top) => top,
                    None => break None,
                };
                match top.children.next() {
                    Some(child) => break Some(child),
                    None => {
                        self.stack.pop();
                    }
                }
            },
        };

        let Some(node) = next_node else {
            self.done = true;
            return None;
        };

        let visit = self.enter(node);
        if visit.is_err() {
            self.done = true;
            self.stack.clear();
        }
        Some(visit)
    }
}

impl std::iter::FusedIterator for TreeWalker<'_> {}

/// Walk the whole tree, failing on the first malformation.
pub fn collect_visits(root: &Node, limits: WalkLimits) -> Result<Vec<Visit<'_>>, TreeError> {
    TreeWalker::new(root, limits).collect()
}
