// src/api/pagination.rs
//! Child-list pagination under a conversion-wide node budget.

use super::block_adapter::convert_block;
use super::BlockSource;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::model::Block;
use crate::types::BlockId;

/// Mutable fetch state shared by every request of one conversion.
#[derive(Debug, Clone)]
pub struct FetchContext {
    max_nodes: usize,
    nodes_used: usize,
    /// Child-list requests sent so far.
    pub requests: usize,
    /// Entries dropped because they could not be read as blocks.
    pub malformed_skipped: usize,
    /// Set once fetching stopped with children left unread.
    pub node_cap_reached: bool,
}

impl FetchContext {
    pub fn new(max_nodes: usize) -> Self {
        Self {
            max_nodes,
            nodes_used: 0,
            requests: 0,
            malformed_skipped: 0,
            node_cap_reached: false,
        }
    }

    pub fn nodes_used(&self) -> usize {
        self.nodes_used
    }

    pub fn is_exhausted(&self) -> bool {
        self.nodes_used >= self.max_nodes
    }

    fn mark_truncated(&mut self, parent: &BlockId) {
        if !self.node_cap_reached {
            log::warn!(
                "Node limit of {} reached while fetching children of {}; output is truncated",
                self.max_nodes,
                parent
            );
        }
        self.node_cap_reached = true;
    }
}

/// Fetches all direct children of `parent`, following cursors.
///
/// Stops without error, possibly mid-page, once the context's node budget is
/// spent. Entries that fail to convert are logged and skipped; a failed
/// request aborts with the error.
pub async fn fetch_children<S>(
    source: &S,
    parent: &BlockId,
    ctx: &mut FetchContext,
) -> Result<Vec<Block>, AppError>
where
    S: BlockSource + ?Sized,
{
    let mut blocks = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        if ctx.is_exhausted() {
            ctx.mark_truncated(parent);
            break;
        }

        let response = source
            .list_children(parent, cursor.as_deref(), NOTION_API_PAGE_SIZE)
            .await?;
        ctx.requests += 1;
        log::debug!(
            "Fetched {} entries under {} (has_more: {})",
            response.results.len(),
            parent,
            response.has_more
        );

        for (position, raw) in response.results.iter().enumerate() {
            if ctx.is_exhausted() {
                ctx.mark_truncated(parent);
                return Ok(blocks);
            }
            match convert_block(raw, position) {
                Ok(block) => {
                    ctx.nodes_used += 1;
                    blocks.push(block);
                }
                Err(malformed) => {
                    log::warn!("Skipping entry under {}: {}", parent, malformed);
                    ctx.malformed_skipped += 1;
                }
            }
        }

        match response.continuation() {
            Some(next) => cursor = Some(next.to_string()),
            None => break,
        }
    }

    Ok(blocks)
}
