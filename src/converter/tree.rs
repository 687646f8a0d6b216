// src/converter/tree.rs
//! Depth-first materialization of a block tree.

use super::numbering::number_list_items;
use crate::api::pagination::{fetch_children, FetchContext};
use crate::api::BlockSource;
use crate::error::AppError;
use crate::model::Node;
use crate::types::BlockId;
use futures::future::{BoxFuture, FutureExt};

/// Walks a block tree one child list at a time.
///
/// Expansion is bounded by depth and by the shared node budget only; a
/// synced reference that loops back is expanded again until one of the two
/// runs out.
pub(crate) struct TreeBuilder<'a, S: ?Sized> {
    source: &'a S,
    max_depth: usize,
    pub(crate) fetch: FetchContext,
    pub(crate) depth_cap_reached: bool,
}

impl<'a, S> TreeBuilder<'a, S>
where
    S: BlockSource + ?Sized,
{
    pub(crate) fn new(source: &'a S, max_depth: usize, max_nodes: usize) -> Self {
        Self {
            source,
            max_depth,
            fetch: FetchContext::new(max_nodes),
            depth_cap_reached: false,
        }
    }

    /// Children of `parent` at `depth`, each with its own subtree.
    ///
    /// Returns nothing once `depth` reaches the maximum.
    pub(crate) fn build<'b>(
        &'b mut self,
        parent: BlockId,
        depth: usize,
    ) -> BoxFuture<'b, Result<Vec<Node>, AppError>>
    where
        'a: 'b,
    {
        async move {
            if depth >= self.max_depth {
                return Ok(Vec::new());
            }

            let mut blocks = fetch_children(self.source, &parent, &mut self.fetch).await?;
            number_list_items(&mut blocks);

            let mut nodes = Vec::with_capacity(blocks.len());
            for block in blocks {
                let children = match block.expansion_source().cloned() {
                    Some(source_id) if depth + 1 < self.max_depth => {
                        self.build(source_id, depth + 1).await?
                    }
                    Some(source_id) => {
                        log::debug!(
                            "Not expanding {} below depth {}",
                            source_id,
                            self.max_depth
                        );
                        self.depth_cap_reached = true;
                        Vec::new()
                    }
                    None => Vec::new(),
                };
                nodes.push(Node::with_children(block, children));
            }

            Ok(nodes)
        }
        .boxed()
    }
}
