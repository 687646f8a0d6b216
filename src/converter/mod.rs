// src/converter/mod.rs
//! Block tree retrieval and Markdown conversion.
//!
//! [`MarkdownConverter`] drives the whole core: it materializes a bounded
//! tree under a root block and renders it into a single Markdown string.

mod numbering;
mod tree;

pub use numbering::number_list_items;

use crate::analytics::measure_content;
use crate::api::BlockSource;
use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, DEFAULT_SITE_BASE_URL};
use crate::error::AppError;
use crate::formatting::{render_document, RenderContext};
use crate::model::Node;
use crate::types::{BaseUrl, BlockId};
use tree::TreeBuilder;

/// Traversal limits and link settings of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Levels of children expanded below the root; 0 fetches nothing.
    pub max_depth: usize,
    /// Nodes materialized across the whole tree before fetching stops.
    pub max_nodes: usize,
    /// Site that page links point at.
    pub site_base: BaseUrl,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            site_base: BaseUrl::from_static(DEFAULT_SITE_BASE_URL),
        }
    }
}

/// What a conversion fetched and where it stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub nodes_materialized: usize,
    pub deepest_level: usize,
    pub malformed_skipped: usize,
    pub node_cap_reached: bool,
    pub depth_cap_reached: bool,
    pub requests: usize,
}

impl ConversionReport {
    /// Whether the document is missing content because a limit was hit.
    pub fn is_truncated(&self) -> bool {
        self.node_cap_reached || self.depth_cap_reached
    }
}

/// A materialized tree plus the report of how it was fetched.
#[derive(Debug, Clone)]
pub struct BlockTree {
    pub nodes: Vec<Node>,
    pub report: ConversionReport,
}

/// Converts the block tree under a root id into Markdown.
pub struct MarkdownConverter<'a, S: ?Sized> {
    source: &'a S,
    config: ConverterConfig,
}

impl<'a, S> MarkdownConverter<'a, S>
where
    S: BlockSource + ?Sized,
{
    pub fn new(source: &'a S, config: ConverterConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Fetches the bounded tree under `root` without rendering it.
    pub async fn build_tree(&self, root: &BlockId) -> Result<BlockTree, AppError> {
        let mut builder = TreeBuilder::new(self.source, self.config.max_depth, self.config.max_nodes);
        let nodes = builder.build(root.clone(), 0).await?;

        let summary = measure_content(&nodes);
        log::info!("Materialized tree under {}: {}", root, summary.describe());

        let report = ConversionReport {
            nodes_materialized: summary.total_nodes,
            deepest_level: summary.deepest_nesting,
            malformed_skipped: builder.fetch.malformed_skipped,
            node_cap_reached: builder.fetch.node_cap_reached,
            depth_cap_reached: builder.depth_cap_reached,
            requests: builder.fetch.requests,
        };

        Ok(BlockTree { nodes, report })
    }

    /// Renders an already materialized tree.
    pub fn render(&self, nodes: &[Node]) -> String {
        render_document(nodes, &RenderContext::new(self.config.site_base.clone()))
    }

    /// Converts the content under `root` into Markdown.
    pub async fn convert(&self, root: &BlockId) -> Result<String, AppError> {
        self.convert_with_report(root)
            .await
            .map(|(markdown, _)| markdown)
    }

    /// Converts the content under `root`, reporting what was fetched.
    pub async fn convert_with_report(
        &self,
        root: &BlockId,
    ) -> Result<(String, ConversionReport), AppError> {
        if root.is_empty() {
            return Err(AppError::InvalidId("empty root block id".to_string()));
        }
        let tree = self.build_tree(root).await?;
        let markdown = self.render(&tree.nodes);
        Ok((markdown, tree.report))
    }
}
