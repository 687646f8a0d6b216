// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Business logic depends on the [`BlockSource`] and [`NotionRepository`]
//! traits, never on HTTP details, so conversions can run against an
//! in-memory source in tests.

pub mod block_adapter;
pub mod client;
pub mod pagination;
pub mod parser;
pub mod types;

use crate::error::AppError;
use crate::model::Page;
use crate::types::{BlockId, DatabaseId, PageId};
use serde_json::Value;

pub use client::{ClientConfig, NotionHttpClient};
pub use types::{DatabaseQueryRequest, PaginatedResponse, SearchFilter, SearchRequest, Sort};

/// The ability to list a block's direct children, one page at a time.
///
/// Entries are returned raw; [`block_adapter::convert_block`] decides per
/// entry whether it is usable.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    async fn list_children(
        &self,
        parent: &BlockId,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<PaginatedResponse<Value>, AppError>;
}

/// The ability to retrieve pages and find them in a workspace.
#[async_trait::async_trait]
pub trait NotionRepository: BlockSource {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError>;

    async fn search(&self, request: &SearchRequest) -> Result<PaginatedResponse<Value>, AppError>;

    async fn query_database(
        &self,
        id: &DatabaseId,
        request: &DatabaseQueryRequest,
    ) -> Result<PaginatedResponse<Value>, AppError>;
}
