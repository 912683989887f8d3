//! Tree builder turning flat parent-pointer records into an owned tree.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::entities::{Node, Record};
use crate::domain::error::TreeResult;
use crate::domain::validator::validate_sorted;

/// Constructs a rooted [`Node`] tree from unordered records.
pub struct TreeBuilder {
    relationship_cache: HashMap<usize, Vec<usize>>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            relationship_cache: HashMap::new(),
        }
    }

    /// Build the tree described by `records`.
    ///
    /// Empty input yields `Ok(None)`. Otherwise the records are validated and
    /// the first violation is returned unchanged. Children of every node are
    /// ordered by ascending id, independent of input order.
    #[instrument(level = "debug", skip(self, records), fields(count = records.len()))]
    pub fn build(&mut self, records: &[Record]) -> TreeResult<Option<Node>> {
        if records.is_empty() {
            debug!("empty input, no tree");
            return Ok(None);
        }

        let mut sorted = records.to_vec();
        sorted.sort_unstable_by_key(|r| r.id);
        validate_sorted(&sorted)?;

        // Reset state for fresh build
        self.relationship_cache.clear();
        self.index_children(&sorted);

        let root = self.build_tree(sorted.len());
        debug!(nodes = sorted.len(), "tree built");
        Ok(Some(root))
    }

    /// Group child ids by parent id; the root's self-reference is skipped.
    fn index_children(&mut self, sorted: &[Record]) {
        for record in sorted.iter().filter(|r| !r.is_root()) {
            self.relationship_cache
                .entry(record.parent_id)
                .or_default()
                .push(record.id);
        }
    }

    /// Materialize nodes depth-first from id 0 with an explicit stack.
    ///
    /// A node is assembled once all of its children are built (post-order),
    /// so ownership moves strictly from children into their parent.
    fn build_tree(&self, count: usize) -> Node {
        let mut built: Vec<Option<Node>> = Vec::with_capacity(count);
        built.resize_with(count, || None);
        let mut stack = vec![(0usize, false)];

        while let Some((id, visited)) = stack.pop() {
            let children = self.relationship_cache.get(&id);
            if !visited {
                stack.push((id, true));
                for &child in children.into_iter().flatten().rev() {
                    stack.push((child, false));
                }
            } else {
                let nodes = children
                    .into_iter()
                    .flatten()
                    .filter_map(|&child| built[child].take())
                    .collect();
                built[id] = Some(Node::new(id, nodes));
            }
        }

        debug_assert!(
            built.iter().skip(1).all(Option::is_none),
            "every non-root node is moved into its parent"
        );
        built[0]
            .take()
            .expect("validated records always assemble the root last")
    }
}

/// One-shot convenience wrapper around [`TreeBuilder::build`].
pub fn build(records: &[Record]) -> TreeResult<Option<Node>> {
    TreeBuilder::new().build(records)
}
