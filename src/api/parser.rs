// src/api/parser.rs
//! Response parsing for Notion API calls.
//!
//! Success bodies deserialize into the caller's type. Error bodies are read
//! with notion-client's error object so the API's own code and message
//! survive into [`AppError::NotionService`].

use super::client::ApiResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use notion_client::objects::error::Error as NotionError;
use reqwest::StatusCode;

/// Parse any Notion API response: the body on success, a service error otherwise.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn parse_error_body(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion error from {}: {} ({:?})",
            url,
            notion_error.code,
            notion_error.request_id
        );
        return AppError::NotionService {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status,
            request_id: notion_error.request_id,
        };
    }

    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status,
        request_id: None,
    }
}

/// The start of a body, cut on a character boundary.
fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PaginatedResponse;
    use serde_json::Value;

    fn response(status: u16, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            url: "https://api.notion.com/v1/blocks/x/children".to_string(),
        }
    }

    #[test]
    fn notion_error_body_keeps_code_and_message() {
        let body = r#"{
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find block with ID: x",
            "request_id": "req_123"
        }"#;

        match parse_api_response::<PaginatedResponse<Value>>(response(404, body)) {
            Err(AppError::NotionService {
                code,
                message,
                request_id,
                ..
            }) => {
                assert_eq!(code, NotionErrorCode::ObjectNotFound);
                assert_eq!(message, "Could not find block with ID: x");
                assert_eq!(request_id.as_deref(), Some("req_123"));
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn unreadable_error_body_falls_back_to_status() {
        match parse_api_response::<Value>(response(502, "<html>Bad gateway</html>")) {
            Err(AppError::NotionService { code, .. }) => {
                assert_eq!(code, NotionErrorCode::HttpStatus(502))
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_success_body_is_deserialization_error() {
        let result = parse_api_response::<PaginatedResponse<Value>>(response(200, "{not json"));
        assert!(matches!(
            result,
            Err(AppError::NotionClient(NotionClientError::Deserialization { .. }))
        ));
    }

    #[test]
    fn parses_children_page() {
        let body = r#"{"object":"list","results":[{"id":"a"}],"next_cursor":"c","has_more":true}"#;
        let page: PaginatedResponse<Value> = parse_api_response(response(200, body)).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.continuation(), Some("c"));
    }

    #[test]
    fn preview_cuts_long_bodies() {
        let long = "é".repeat(ERROR_BODY_PREVIEW_LENGTH + 10);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), ERROR_BODY_PREVIEW_LENGTH + 3);
    }
}
