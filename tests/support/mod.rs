// tests/support/mod.rs
//! In-memory workspace and JSON builders shared by the integration tests.

#![allow(dead_code)]

use notion2markdown::api::{DatabaseQueryRequest, SearchRequest};
use notion2markdown::error::NotionErrorCode;
use notion2markdown::{
    AppError, BlockId, BlockSource, DatabaseId, NotionRepository, Page, PageId, PaginatedResponse,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A workspace held in memory.
///
/// Child lists are stored as pages of raw entries; page `n` is served for the
/// cursor `"<parent>:<n>"`.
#[derive(Default)]
pub struct FakeWorkspace {
    children: HashMap<String, Vec<Vec<Value>>>,
    pages: HashMap<String, Value>,
    search_results: Vec<Value>,
    database_rows: HashMap<String, Vec<Vec<Value>>>,
    failing: Vec<String>,
    child_requests: AtomicUsize,
    pub last_database_query: std::sync::Mutex<Option<DatabaseQueryRequest>>,
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Children of `parent`, served in one page.
    pub fn with_children(self, parent: &str, entries: Vec<Value>) -> Self {
        self.with_paged_children(parent, vec![entries])
    }

    /// Children of `parent`, served page by page.
    pub fn with_paged_children(mut self, parent: &str, pages: Vec<Vec<Value>>) -> Self {
        self.children.insert(parent.to_string(), pages);
        self
    }

    /// Listing the children of `parent` fails with a server error.
    pub fn failing_on(mut self, parent: &str) -> Self {
        self.failing.push(parent.to_string());
        self
    }

    pub fn with_page(mut self, id: &str, title: &str) -> Self {
        self.pages.insert(id.to_string(), page_json(id, title));
        self
    }

    pub fn with_search_results(mut self, results: Vec<Value>) -> Self {
        self.search_results = results;
        self
    }

    pub fn with_database_rows(mut self, database: &str, pages: Vec<Vec<Value>>) -> Self {
        self.database_rows.insert(database.to_string(), pages);
        self
    }

    /// Child-list requests served so far.
    pub fn child_requests(&self) -> usize {
        self.child_requests.load(Ordering::SeqCst)
    }
}

fn page_index(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.rsplit(':').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn serve(key: &str, pages: Option<&Vec<Vec<Value>>>, cursor: Option<&str>) -> PaginatedResponse<Value> {
    let Some(pages) = pages else {
        return PaginatedResponse::last(Vec::new());
    };
    let index = page_index(cursor);
    let results = pages.get(index).cloned().unwrap_or_default();
    if index + 1 < pages.len() {
        PaginatedResponse::with_more(results, format!("{}:{}", key, index + 1))
    } else {
        PaginatedResponse::last(results)
    }
}

fn server_error() -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::InternalError,
        message: "boom".to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
        request_id: None,
    }
}

#[async_trait::async_trait]
impl BlockSource for FakeWorkspace {
    async fn list_children(
        &self,
        parent: &BlockId,
        cursor: Option<&str>,
        _page_size: usize,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        self.child_requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|id| id == parent.as_str()) {
            return Err(server_error());
        }
        Ok(serve(parent.as_str(), self.children.get(parent.as_str()), cursor))
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeWorkspace {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        let raw = self.pages.get(id.as_str()).cloned().ok_or_else(|| AppError::NotionService {
            code: NotionErrorCode::ObjectNotFound,
            message: format!("Could not find page with ID: {}", id),
            status: StatusCode::NOT_FOUND,
            request_id: None,
        })?;
        Ok(serde_json::from_value(raw)?)
    }

    async fn search(&self, _request: &SearchRequest) -> Result<PaginatedResponse<Value>, AppError> {
        Ok(PaginatedResponse::last(self.search_results.clone()))
    }

    async fn query_database(
        &self,
        id: &DatabaseId,
        request: &DatabaseQueryRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        if let Ok(mut last) = self.last_database_query.lock() {
            *last = Some(request.clone());
        }
        Ok(serve(
            id.as_str(),
            self.database_rows.get(id.as_str()),
            request.start_cursor.as_deref(),
        ))
    }
}

// --- JSON builders ---

pub fn text_run(content: &str) -> Value {
    json!({
        "type": "text",
        "text": {"content": content, "link": null},
        "annotations": {"bold": false, "italic": false, "strikethrough": false,
                        "underline": false, "code": false, "color": "default"},
        "plain_text": content,
        "href": null
    })
}

pub fn styled_run(content: &str, annotations: Value) -> Value {
    let mut run = text_run(content);
    run["annotations"] = annotations;
    run
}

/// A block of `block_type` whose payload carries `content` as its run list.
pub fn text_block(id: &str, block_type: &str, content: &str) -> Value {
    let rich_text = if content.is_empty() {
        json!([])
    } else {
        json!([text_run(content)])
    };
    json!({
        "object": "block",
        "id": id,
        "type": block_type,
        "has_children": false,
        block_type: {"rich_text": rich_text, "color": "default"}
    })
}

pub fn paragraph(id: &str, content: &str) -> Value {
    text_block(id, "paragraph", content)
}

pub fn bullet(id: &str, content: &str) -> Value {
    text_block(id, "bulleted_list_item", content)
}

pub fn numbered(id: &str, content: &str) -> Value {
    text_block(id, "numbered_list_item", content)
}

pub fn heading(id: &str, level: u8, content: &str) -> Value {
    text_block(id, &format!("heading_{}", level), content)
}

pub fn with_children(mut block: Value) -> Value {
    block["has_children"] = json!(true);
    block
}

pub fn table(id: &str, width: usize, column_header: bool, row_header: bool) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "table",
        "has_children": true,
        "table": {
            "table_width": width,
            "has_column_header": column_header,
            "has_row_header": row_header
        }
    })
}

pub fn table_row(id: &str, cells: &[&str]) -> Value {
    let cells: Vec<Value> = cells
        .iter()
        .map(|c| if c.is_empty() { json!([]) } else { json!([text_run(c)]) })
        .collect();
    json!({
        "object": "block",
        "id": id,
        "type": "table_row",
        "has_children": false,
        "table_row": {"cells": cells}
    })
}

pub fn synced_reference(id: &str, original: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "synced_block",
        "has_children": false,
        "synced_block": {"synced_from": {"type": "block_id", "block_id": original}}
    })
}

pub fn page_json(id: &str, title: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "url": format!("https://www.notion.so/{}", id),
        "public_url": null,
        "archived": false,
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [text_run(title)]},
            "Status": {"id": "s", "type": "status", "status": {"name": "Active"}},
            "Owner": {"id": "o", "type": "people", "people": []}
        }
    })
}

pub fn page_ref(id: &str) -> Value {
    json!({"object": "page", "id": id})
}
