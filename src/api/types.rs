// src/api/types.rs
//! Request and response shapes of the Notion REST endpoints this crate uses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- API Response Types ---

/// Generic paginated response from Notion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A single page of results with no continuation.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page of results followed by more under `cursor`.
    pub fn with_more(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }

    /// The cursor to request next, if the endpoint has more to give.
    ///
    /// An empty cursor is treated as no cursor.
    pub fn continuation(&self) -> Option<&str> {
        match self.next_cursor.as_deref() {
            Some(cursor) if self.has_more && !cursor.is_empty() => Some(cursor),
            _ => None,
        }
    }
}

// --- API Request Types ---

/// Sort option for search and database queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

/// Restricts search results to one object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub value: String,
    pub property: String,
}

impl SearchFilter {
    pub fn pages_only() -> Self {
        Self {
            value: "page".to_string(),
            property: "object".to_string(),
        }
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl SearchRequest {
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

/// Body of `POST /databases/{id}/query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseQueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl DatabaseQueryRequest {
    /// Rows whose title property contains `query`.
    pub fn title_contains(title_property: &str, query: &str) -> Self {
        Self {
            filter: Some(serde_json::json!({
                "property": title_property,
                "title": { "contains": query }
            })),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_request_omits_unset_fields() {
        let request = SearchRequest::for_query("docs");
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"query": "docs"}));
    }

    #[test]
    fn title_filter_shape() {
        let request = DatabaseQueryRequest::title_contains("Name", "roadmap");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"filter": {"property": "Name", "title": {"contains": "roadmap"}}})
        );
    }

    #[test]
    fn empty_cursor_ends_pagination() {
        let page: PaginatedResponse<Value> =
            serde_json::from_value(json!({"object": "list", "results": [], "has_more": true, "next_cursor": ""}))
                .unwrap();
        assert_eq!(page.continuation(), None);

        let page: PaginatedResponse<Value> = PaginatedResponse::with_more(vec![], "c2");
        assert_eq!(page.continuation(), Some("c2"));
    }
}
