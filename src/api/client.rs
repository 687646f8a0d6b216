// src/api/client.rs
//! Thin HTTP client wrapper for the Notion API.
//!
//! Handles authentication headers and request dispatch; parsing lives in
//! [`super::parser`].

use super::types::{DatabaseQueryRequest, PaginatedResponse, SearchRequest};
use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_NOTION_VERSION, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::AppError;
use crate::model::Page;
use crate::types::{ApiKey, BaseUrl, BlockId, DatabaseId, PageId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Connection settings for [`NotionHttpClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub notion_version: String,
    pub timeout: Duration,
    pub base_url: BaseUrl,
}

impl ClientConfig {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            base_url,
        }
    }

    pub fn with_notion_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        if !version.trim().is_empty() {
            self.notion_version = version;
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(BaseUrl::from_static(DEFAULT_API_BASE_URL))
    }
}

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: BaseUrl,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key, &config.notion_version)?)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey, notion_version: &str) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(notion_version).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Notion-Version header: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        self.get_with_query(endpoint, &[]).await
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_query(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response, AppError> {
        let url = self.base_url.join(endpoint);
        log::debug!("GET {} {:?}", url, query);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.base_url.join(endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

/// Query parameters of one `GET /blocks/{id}/children` call.
fn children_query(cursor: Option<&str>, page_size: usize) -> Vec<(&'static str, String)> {
    let mut query = vec![("page_size", page_size.to_string())];
    if let Some(cursor) = cursor {
        query.push(("start_cursor", cursor.to_string()));
    }
    query
}

#[async_trait::async_trait]
impl super::BlockSource for NotionHttpClient {
    async fn list_children(
        &self,
        parent: &BlockId,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        let endpoint = format!("blocks/{}/children", parent);
        let response = self
            .get_with_query(&endpoint, &children_query(cursor, page_size))
            .await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_api_response(result)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        let endpoint = format!("pages/{}", id);
        let response = self.get(&endpoint).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_api_response(result)
    }

    async fn search(&self, request: &SearchRequest) -> Result<PaginatedResponse<Value>, AppError> {
        let response = self.post("search", request).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_api_response(result)
    }

    async fn query_database(
        &self,
        id: &DatabaseId,
        request: &DatabaseQueryRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        let endpoint = format!("databases/{}/query", id);
        let response = self.post(&endpoint, request).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_api_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
