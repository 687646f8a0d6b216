// src/pipeline.rs
//! Runs a resolved [`Command`] against a workspace and assembles the output.

use crate::api::{DatabaseQueryRequest, NotionRepository, SearchFilter, SearchRequest};
use crate::config::{Command, PipelineConfig};
use crate::error::AppError;
use crate::formatting::compose_page_markdown;
use crate::workspace::{
    find_page_by_query, get_page_content, search_database, search_workspace, PageContent,
};

/// Separates pages when a command converts more than one.
const PAGE_SEPARATOR: &str = "\n---\n\n";

/// Fetches the pages a command names.
pub async fn collect_pages<R>(repo: &R, config: &PipelineConfig) -> Result<Vec<PageContent>, AppError>
where
    R: NotionRepository + ?Sized,
{
    let converter = &config.converter;
    match &config.command {
        Command::Page(id) => Ok(vec![get_page_content(repo, id, converter).await?]),
        Command::Find(query) => Ok(vec![find_page_by_query(repo, query, converter).await?]),
        Command::Search { query, limit } => {
            let request = SearchRequest {
                filter: Some(SearchFilter::pages_only()),
                ..SearchRequest::for_query(query.as_str())
            };
            let pages = search_workspace(repo, &request, *limit, converter).await?;
            if pages.is_empty() {
                return Err(AppError::NoMatchingPages {
                    query: query.clone(),
                });
            }
            Ok(pages)
        }
        Command::Database {
            id,
            query,
            title_property,
            limit,
        } => {
            let request = match query {
                Some(query) => DatabaseQueryRequest::title_contains(title_property, query),
                None => DatabaseQueryRequest::default(),
            };
            search_database(repo, id, request, *limit, converter).await
        }
    }
}

/// Composes converted pages into one Markdown document.
pub fn compose_output(pages: &[PageContent], include_properties: bool) -> String {
    pages
        .iter()
        .map(|page| compose_page_markdown(page, include_properties))
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// Runs the configured command and returns the final Markdown.
pub async fn run<R>(repo: &R, config: &PipelineConfig) -> Result<String, AppError>
where
    R: NotionRepository + ?Sized,
{
    let pages = collect_pages(repo, config).await?;
    log::info!("Converted {} page(s)", pages.len());
    Ok(compose_output(&pages, config.include_properties))
}
