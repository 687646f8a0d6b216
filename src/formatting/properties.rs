// src/formatting/properties.rs
//! Page property helpers: title extraction and value rendering.
//!
//! Properties stay raw JSON; only the handful of types worth printing are
//! interpreted here.

use indexmap::IndexMap;
use serde_json::Value;

/// Property keys conventionally holding a page's title.
const TITLE_KEYS: &[&str] = &["Name", "Title", "name", "title"];

/// Property types whose values are printed alongside the content.
const PRINTABLE_TYPES: &[&str] = &["status", "date", "number", "url", "select", "multi_select"];

/// Extracts the page title from its properties.
///
/// The first `title`-typed property wins; otherwise the conventional title
/// keys are tried with either a `title` or a `rich_text` run list. Returns an
/// empty string when no title is found.
pub fn extract_title(properties: &IndexMap<String, Value>) -> String {
    let typed = properties
        .values()
        .find(|value| property_type(value) == Some("title"))
        .and_then(|value| value.get("title"))
        .and_then(Value::as_array);
    if let Some(runs) = typed {
        return runs_plain_text(runs);
    }

    TITLE_KEYS
        .iter()
        .filter_map(|key| properties.get(*key))
        .find_map(|value| {
            value
                .get("title")
                .or_else(|| value.get("rich_text"))
                .and_then(Value::as_array)
        })
        .map(|runs| runs_plain_text(runs))
        .unwrap_or_default()
}

/// Keeps the title keys and the printable property types, preserving order.
pub fn select_printable_properties(properties: &IndexMap<String, Value>) -> IndexMap<String, Value> {
    properties
        .iter()
        .filter(|(key, value)| {
            matches!(key.as_str(), "title" | "Name" | "Title")
                || property_type(value).is_some_and(|kind| PRINTABLE_TYPES.contains(&kind))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Renders a property value as a single line of text.
///
/// Returns an empty string for unset values and unsupported types.
pub fn render_property_value(value: &Value) -> String {
    let Some(kind) = property_type(value) else {
        return String::new();
    };
    let payload = value.get(kind).unwrap_or(&Value::Null);

    match kind {
        "title" | "rich_text" => payload
            .as_array()
            .map(|runs| runs_plain_text(runs))
            .unwrap_or_default(),
        "status" | "select" => option_name(payload).unwrap_or_default(),
        "multi_select" => payload
            .as_array()
            .map(|options| {
                options
                    .iter()
                    .filter_map(option_name)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default(),
        "date" => format_date(payload),
        "number" => match payload {
            Value::Number(number) => number.to_string(),
            _ => String::new(),
        },
        "url" => payload.as_str().unwrap_or_default().to_string(),
        _ => String::new(),
    }
}

fn property_type(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

fn runs_plain_text(runs: &[Value]) -> String {
    runs.iter()
        .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
        .collect::<String>()
        .trim()
        .to_string()
}

fn option_name(option: &Value) -> Option<String> {
    option
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn format_date(date: &Value) -> String {
    let start = date.get("start").and_then(Value::as_str).unwrap_or_default();
    match date.get("end").and_then(Value::as_str) {
        Some(end) if !start.is_empty() => format!("{} → {}", start, end),
        _ => start.to_string(),
    }
}
