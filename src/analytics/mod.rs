// src/analytics/mod.rs
//! Content measurement and statistics for materialized block trees.

use crate::model::Node;
use indexmap::IndexMap;

/// Statistics of one block tree, for logs and the conversion report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSummary {
    pub total_nodes: usize,
    /// Levels below the root; top-level blocks are level 1, an empty tree is 0.
    pub deepest_nesting: usize,
    /// Node count per block type, in order of first appearance.
    pub block_types: IndexMap<String, usize>,
}

impl ContentSummary {
    /// One-line description for log output, e.g. `12 nodes, 3 levels (paragraph: 8, ...)`.
    pub fn describe(&self) -> String {
        let types = self
            .block_types
            .iter()
            .map(|(block_type, count)| format!("{}: {}", block_type, count))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} nodes, {} levels ({})",
            self.total_nodes, self.deepest_nesting, types
        )
    }
}

/// Measures basic content statistics for a tree of top-level nodes.
pub fn measure_content(nodes: &[Node]) -> ContentSummary {
    let mut summary = ContentSummary::default();
    walk(&mut summary, nodes, 1);
    summary
}

fn walk(summary: &mut ContentSummary, nodes: &[Node], level: usize) {
    if nodes.is_empty() {
        return;
    }
    summary.deepest_nesting = summary.deepest_nesting.max(level);
    for node in nodes {
        summary.total_nodes += 1;
        *summary
            .block_types
            .entry(node.block.block_type().to_string())
            .or_insert(0) += 1;
        walk(summary, &node.children, level + 1);
    }
}

/// Counts nodes recursively.
pub fn count_nodes(nodes: &[Node]) -> usize {
    nodes.len() + nodes.iter().map(|n| count_nodes(&n.children)).sum::<usize>()
}
