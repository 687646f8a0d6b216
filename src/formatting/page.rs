// src/formatting/page.rs
//! Page-level composition: title, properties, content, metadata.

use super::properties::render_property_value;
use crate::workspace::PageContent;

/// Composes a converted page into a standalone Markdown document.
pub fn compose_page_markdown(page: &PageContent, include_properties: bool) -> String {
    let sections = [
        compose_title_section(page),
        if include_properties {
            compose_properties_section(page)
        } else {
            String::new()
        },
        format!("{}\n\n", page.markdown.trim_end()),
        compose_metadata_section(page),
    ];
    sections.concat()
}

fn compose_title_section(page: &PageContent) -> String {
    let title = if page.title.is_empty() {
        "Untitled"
    } else {
        page.title.as_str()
    };
    format!("# {}\n\n", title)
}

fn compose_properties_section(page: &PageContent) -> String {
    let lines: Vec<String> = page
        .properties
        .iter()
        .filter(|(_, value)| value.get("type").and_then(|t| t.as_str()) != Some("title"))
        .filter_map(|(key, value)| {
            let formatted = render_property_value(value);
            (!formatted.is_empty()).then(|| format!("- **{}**: {}", key, formatted))
        })
        .collect();

    if lines.is_empty() {
        return String::new();
    }
    format!("## Properties\n\n{}\n\n", lines.join("\n"))
}

fn compose_metadata_section(page: &PageContent) -> String {
    format!(
        "## Metadata\n\n- **Page ID**: {}\n- **URL**: {}\n",
        page.id, page.url
    )
}
