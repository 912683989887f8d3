//! Domain entities: flat input records and the tree built from them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat input entry declaring one node and its parent.
///
/// The record with `id == 0` is the root and names itself as parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Record {
    pub id: usize,
    pub parent_id: usize,
}

impl Record {
    pub fn new(id: usize, parent_id: usize) -> Self {
        Self { id, parent_id }
    }

    /// True for the root convention `{0, 0}`.
    pub fn is_root(&self) -> bool {
        self.id == 0 && self.parent_id == 0
    }
}

impl From<(usize, usize)> for Record {
    fn from((id, parent_id): (usize, usize)) -> Self {
        Self { id, parent_id }
    }
}

/// Tree node materialized from validated records.
///
/// Each node exclusively owns its children, which are kept sorted by id.
/// There is no way to mutate a node after construction.
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` never recurse, so trees of any
/// depth can be copied, compared and dropped.
pub struct Node {
    id: usize,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn new(id: usize, children: Vec<Node>) -> Self {
        Self { id, children }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels in this subtree; a lone node has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false: a subtree contains at least its own root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Ids of all leaf nodes in pre-order.
    pub fn leaf_ids(&self) -> Vec<usize> {
        self.iter()
            .filter(|node| node.is_leaf())
            .map(Node::id)
            .collect()
    }

    /// Pre-order depth-first traversal.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Flattens the subtree back into records, sorted by id.
    ///
    /// The subtree root is emitted as its own parent, so flattening a full
    /// tree and rebuilding it yields an equal tree.
    pub fn to_records(&self) -> Vec<Record> {
        let mut records = vec![Record::new(self.id, self.id)];
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            for child in &node.children {
                records.push(Record::new(child.id, node.id));
                stack.push(child);
            }
        }
        records.sort_unstable();
        records
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        // Post-order: finished subtrees wait on `built` until their parent
        // takes the last `children.len()` of them.
        let mut built: Vec<Node> = Vec::new();
        let mut stack = vec![(self, false)];
        while let Some((node, visited)) = stack.pop() {
            if visited {
                let children = built.split_off(built.len() - node.children.len());
                built.push(Node::new(node.id, children));
            } else {
                stack.push((node, true));
                stack.extend(node.children.iter().rev().map(|child| (child, false)));
            }
        }
        built.pop().expect("post-order walk leaves exactly the root")
    }
}

impl PartialEq for Node {
    /// Two trees are equal when their pre-order walks agree on every id and
    /// child count, which fixes the whole shape.
    fn eq(&self, other: &Self) -> bool {
        self.iter()
            .map(|n| (n.id, n.children.len()))
            .eq(other.iter().map(|n| (n.id, n.children.len())))
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    // Children are listed by id only; nested formatting would recurse.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let child_ids: Vec<usize> = self.children.iter().map(Node::id).collect();
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("children", &child_ids)
            .field("len", &self.len())
            .finish()
    }
}

impl Drop for Node {
    // Unlink descendants iteratively so dropping a deep chain cannot
    // exhaust the stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = NodeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a [`Node`] and its descendants.
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
