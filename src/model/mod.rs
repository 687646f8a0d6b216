mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::*;

use crate::types::PageId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A block together with the children resolved for it during traversal.
///
/// Children keep the order the API returned them in, across pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub block: Block,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(block: Block) -> Self {
        Self {
            block,
            children: Vec::new(),
        }
    }

    pub fn with_children(block: Block, children: Vec<Node>) -> Self {
        Self { block, children }
    }
}

/// A Notion page's metadata.
///
/// Properties are kept as raw JSON in API order; only a handful of them are
/// ever displayed, see [`crate::formatting::select_printable_properties`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
}

impl Page {
    /// The public URL when the page is shared to the web, else the workspace URL.
    pub fn preferred_url(&self) -> &str {
        match self.public_url.as_deref() {
            Some(public) if !public.is_empty() => public,
            _ => &self.url,
        }
    }
}

/// Minimal view of a search or query result, enough to tell pages apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object: String,
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl ObjectRef {
    pub fn is_page(&self) -> bool {
        self.object == "page"
    }
}
