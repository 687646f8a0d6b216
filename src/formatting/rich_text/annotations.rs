// src/formatting/rich_text/annotations.rs
//! Annotation processing for rich text.

use crate::types::Annotations;

/// Renderer for text styles to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Wraps `content` in the markers its annotations call for.
    ///
    /// Markers nest innermost first: code, bold, italic, strikethrough,
    /// underline. Leading and trailing whitespace is moved outside all
    /// markers, and whitespace-only content is returned unchanged.
    pub fn apply_styles(content: &str, annotations: &Annotations) -> String {
        let core = content.trim();
        if core.is_empty() {
            return content.to_string();
        }

        let leading = &content[..content.len() - content.trim_start().len()];
        let trailing = &content[content.trim_end().len()..];

        let mut result = core.to_string();

        if annotations.code {
            result = format!("`{}`", result);
        }

        if annotations.bold {
            result = format!("**{}**", result);
        }

        if annotations.italic {
            result = format!("_{}_", result);
        }

        if annotations.strikethrough {
            result = format!("~~{}~~", result);
        }

        // Underline requires HTML
        if annotations.underline {
            result = format!("<u>{}</u>", result);
        }

        format!("{}{}{}", leading, result, trailing)
    }
}
