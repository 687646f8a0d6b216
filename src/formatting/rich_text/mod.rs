// src/formatting/rich_text/mod.rs
//! Handles formatting of Notion RichTextItem arrays into Markdown.

mod annotations;

pub use annotations::MarkdownStyleRenderer;

use crate::types::RichTextItem;

/// Formats a run list into Markdown, trimmed at both ends.
pub fn rich_text_to_markdown(items: &[RichTextItem]) -> String {
    render_segments(items).trim().to_string()
}

/// Concatenates the rendered runs without trimming the result.
///
/// Whitespace at run edges survives here, which is what keeps adjacent runs
/// apart; callers trim once the whole list is rendered.
pub fn render_segments(items: &[RichTextItem]) -> String {
    items.iter().map(render_segment).collect()
}

/// Renders one run.
///
/// An equation run renders as `$expression$` with no other styling, and
/// not at all when its expression is empty. Any other run renders its plain
/// text with annotation markers, then as a link when it carries an `href`.
pub fn render_segment(item: &RichTextItem) -> String {
    if let Some(expression) = item.equation_expression() {
        if expression.is_empty() {
            return String::new();
        }
        return format!("${}$", expression);
    }

    if item.plain_text.is_empty() {
        return String::new();
    }

    let styled = MarkdownStyleRenderer::apply_styles(&item.plain_text, &item.annotations);

    match item.href.as_deref() {
        Some(href) if !href.is_empty() => format!("[{}]({})", styled, href),
        _ => styled,
    }
}
