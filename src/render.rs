//! Rendering of built trees for terminal output.

use itertools::Itertools;
use termtree::Tree;
use thiserror::Error;

use crate::config::OutputFormat;
use crate::domain::Node;

/// Deepest tree the `tree` format will draw. Every line repeats one indent
/// per level, so output grows with depth squared; deeper trees are rendered
/// as `records` or `summary` instead.
pub const MAX_TREE_DEPTH: usize = 1_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("tree too deep to draw: depth {depth} exceeds {max}, use --format records or summary")]
    TooDeep { depth: usize, max: usize },
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for Node {
    fn to_tree_string(&self) -> Tree<String> {
        let mut built: Vec<Tree<String>> = Vec::new();
        let mut stack = vec![(self, false)];
        while let Some((node, visited)) = stack.pop() {
            if visited {
                let leaves = built.split_off(built.len() - node.children().len());
                built.push(Tree::new(node.id().to_string()).with_leaves(leaves));
            } else {
                stack.push((node, true));
                stack.extend(node.children().iter().rev().map(|c| (c, false)));
            }
        }
        built.pop().expect("post-order walk leaves exactly the root")
    }
}

/// Render `root` in the requested format, without trailing newline.
pub fn render(root: &Node, format: OutputFormat) -> Result<String, RenderError> {
    let rendered = match format {
        OutputFormat::Tree => {
            let depth = root.depth();
            if depth > MAX_TREE_DEPTH {
                return Err(RenderError::TooDeep {
                    depth,
                    max: MAX_TREE_DEPTH,
                });
            }
            root.to_tree_string().to_string().trim_end().to_string()
        }
        OutputFormat::Records => root
            .to_records()
            .iter()
            .map(|r| format!("{} {}", r.id, r.parent_id))
            .join("\n"),
        OutputFormat::Summary => format!(
            "nodes: {}\ndepth: {}\nleaves: {}",
            root.len(),
            root.depth(),
            root.leaf_ids().len()
        ),
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build, Record};

    fn sample() -> Node {
        let records: Vec<Record> = [(0, 0), (1, 0), (2, 0), (3, 1), (4, 1)]
            .into_iter()
            .map(Record::from)
            .collect();
        build(&records).unwrap().unwrap()
    }

    fn chain(len: usize) -> Node {
        let records: Vec<Record> = (0..len)
            .map(|id| Record::new(id, id.saturating_sub(1)))
            .collect();
        build(&records).unwrap().unwrap()
    }

    #[test]
    fn test_render_tree() {
        let expected = "0\n├── 1\n│   ├── 3\n│   └── 4\n└── 2";
        assert_eq!(render(&sample(), OutputFormat::Tree).unwrap(), expected);
    }

    #[test]
    fn test_render_records() {
        assert_eq!(
            render(&sample(), OutputFormat::Records).unwrap(),
            "0 0\n1 0\n2 0\n3 1\n4 1"
        );
    }

    #[test]
    fn test_render_summary() {
        assert_eq!(
            render(&sample(), OutputFormat::Summary).unwrap(),
            "nodes: 5\ndepth: 3\nleaves: 3"
        );
    }

    #[test]
    fn test_render_tree_at_depth_limit() {
        let rendered = render(&chain(MAX_TREE_DEPTH), OutputFormat::Tree).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), MAX_TREE_DEPTH);
        assert_eq!(lines[1], "└── 1");
        assert!(lines[MAX_TREE_DEPTH - 1].ends_with("└── 999"));
    }

    #[test]
    fn test_render_deep_chain() {
        let root = chain(50_000);

        let err = render(&root, OutputFormat::Tree).unwrap_err();
        assert_eq!(
            err,
            RenderError::TooDeep {
                depth: 50_000,
                max: MAX_TREE_DEPTH
            }
        );

        let records = render(&root, OutputFormat::Records).unwrap();
        assert_eq!(records.lines().count(), 50_000);
        assert_eq!(records.lines().last(), Some("49999 49998"));
        assert_eq!(
            render(&root, OutputFormat::Summary).unwrap(),
            "nodes: 50000\ndepth: 50000\nleaves: 1"
        );
    }

}
