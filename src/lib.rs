// src/lib.rs
//! notion2markdown library: converts Notion block trees into Markdown.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`, `MalformedBlock`
//! - **Configuration**: `PipelineConfig`, `ConverterConfig`
//! - **Domain model**: `Block`, `Node`, `Page`
//! - **Domain types**: `NotionId`, `ApiKey`, `BlockId`, `PageId`, etc.
//! - **API client**: `BlockSource`, `NotionRepository`, `NotionHttpClient`
//! - **Conversion**: `MarkdownConverter`, `render_document`
//! - **Workspace**: `get_page_content`, `search_workspace`, `search_database`

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod converter;
pub mod error;
pub mod formatting;
pub mod model;
pub mod pipeline;
pub mod types;
pub mod workspace;

// --- Error Handling ---
pub use crate::error::{AppError, MalformedBlock, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Command, CommandLineInput, PipelineConfig};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon, Node, Page};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BaseUrl, BlockId, DatabaseId, NotionId, PageId, RichTextItem,
};

// --- API Client ---
pub use crate::api::{BlockSource, ClientConfig, NotionHttpClient, NotionRepository, PaginatedResponse};

// --- Conversion ---
pub use crate::converter::{BlockTree, ConversionReport, ConverterConfig, MarkdownConverter};
pub use crate::formatting::{render_document, rich_text_to_markdown, RenderContext};

// --- Workspace ---
pub use crate::workspace::{
    find_page_by_query, get_page_content, search_database, search_workspace, PageContent,
};
