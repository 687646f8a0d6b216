// src/workspace.rs
//! Workspace-level operations: converting whole pages, searching the
//! workspace, and querying databases.

use crate::api::{DatabaseQueryRequest, NotionRepository, SearchRequest};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::converter::{ConverterConfig, MarkdownConverter};
use crate::error::AppError;
use crate::formatting::{extract_title, select_printable_properties};
use crate::model::ObjectRef;
use crate::types::{BlockId, DatabaseId, PageId, ValidationError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page converted to Markdown, with the metadata worth printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub id: PageId,
    pub title: String,
    pub markdown: String,
    /// The public URL when the page is shared, else the workspace URL.
    pub url: String,
    pub properties: IndexMap<String, Value>,
}

/// Retrieves a page and converts its content.
pub async fn get_page_content<R>(
    repo: &R,
    page_id: &PageId,
    config: &ConverterConfig,
) -> Result<PageContent, AppError>
where
    R: NotionRepository + ?Sized,
{
    let page = repo.retrieve_page(page_id).await?;
    let converter = MarkdownConverter::new(repo, config.clone());
    let (markdown, report) = converter
        .convert_with_report(&BlockId::from(&page.id))
        .await?;

    if report.is_truncated() {
        log::warn!(
            "Page {} was truncated ({} nodes, node cap reached: {}, depth cap reached: {})",
            page.id,
            report.nodes_materialized,
            report.node_cap_reached,
            report.depth_cap_reached
        );
    }

    Ok(PageContent {
        title: extract_title(&page.properties),
        url: page.preferred_url().to_string(),
        properties: select_printable_properties(&page.properties),
        id: page.id,
        markdown,
    })
}

/// Searches the workspace and converts up to `limit` matching pages.
///
/// A `limit` of 0 means no limit. Non-page results are ignored; pages that
/// fail to convert are logged and skipped.
pub async fn search_workspace<R>(
    repo: &R,
    request: &SearchRequest,
    limit: usize,
    config: &ConverterConfig,
) -> Result<Vec<PageContent>, AppError>
where
    R: NotionRepository + ?Sized,
{
    let response = repo.search(request).await?;
    let page_ids = page_refs(&response.results, limit);
    log::debug!("Search matched {} pages", page_ids.len());

    let mut pages = Vec::with_capacity(page_ids.len());
    for id in page_ids {
        match get_page_content(repo, &id, config).await {
            Ok(content) => pages.push(content),
            Err(err) => log::warn!("Skipping page {}: {}", id, err),
        }
    }
    Ok(pages)
}

/// Queries a database page by page and converts up to `limit` row pages.
///
/// A `limit` of 0 means no limit. Rows that fail to convert are logged and
/// skipped; a failed query aborts.
pub async fn search_database<R>(
    repo: &R,
    database_id: &DatabaseId,
    request: DatabaseQueryRequest,
    limit: usize,
    config: &ConverterConfig,
) -> Result<Vec<PageContent>, AppError>
where
    R: NotionRepository + ?Sized,
{
    let mut request = DatabaseQueryRequest {
        page_size: Some(NOTION_API_PAGE_SIZE),
        start_cursor: None,
        ..request
    };
    let mut pages = Vec::new();

    loop {
        let response = repo.query_database(database_id, &request).await?;

        for raw in &response.results {
            let Ok(row) = serde_json::from_value::<ObjectRef>(raw.clone()) else {
                log::warn!("Skipping unreadable row of database {}", database_id);
                continue;
            };
            let id = PageId::new(row.id);
            match get_page_content(repo, &id, config).await {
                Ok(content) => pages.push(content),
                Err(err) => {
                    log::warn!("Skipping row {}: {}", id, err);
                    continue;
                }
            }
            if limit > 0 && pages.len() >= limit {
                return Ok(pages);
            }
        }

        match response.continuation() {
            Some(cursor) => request.start_cursor = Some(cursor.to_string()),
            None => break,
        }
    }

    Ok(pages)
}

/// Converts the first page the workspace search returns for `query`.
pub async fn find_page_by_query<R>(
    repo: &R,
    query: &str,
    config: &ConverterConfig,
) -> Result<PageContent, AppError>
where
    R: NotionRepository + ?Sized,
{
    if query.trim().is_empty() {
        return Err(ValidationError::EmptyField("query").into());
    }

    let response = repo.search(&SearchRequest::for_query(query)).await?;
    let Some(id) = page_refs(&response.results, 1).into_iter().next() else {
        return Err(AppError::NoMatchingPages {
            query: query.to_string(),
        });
    };
    get_page_content(repo, &id, config).await
}

/// Ids of the page objects among raw search results, at most `limit` (0 = all).
fn page_refs(results: &[Value], limit: usize) -> Vec<PageId> {
    let pages = results
        .iter()
        .filter_map(|raw| serde_json::from_value::<ObjectRef>(raw.clone()).ok())
        .filter(ObjectRef::is_page)
        .map(|page| PageId::new(page.id));

    if limit > 0 {
        pages.take(limit).collect()
    } else {
        pages.collect()
    }
}
