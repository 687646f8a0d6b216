// src/formatting/block_renderer.rs
//! Block rendering engine: converts a materialized block tree to Markdown.
//!
//! Rendering is a pure function of the tree and the [`RenderContext`]; the
//! indentation of each block travels down the recursion in an immutable
//! [`FormatContext`].

use super::rich_text::rich_text_to_markdown;
use super::state::FormatContext;
use super::table::render_table;
use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, DEFAULT_CODE_LANGUAGE, EMPTY_DOCUMENT_PLACEHOLDER};
use crate::model::*;
use crate::types::{plain_text_of, BaseUrl};

/// Settings shared by every block of one document.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Site that `link_to_page` targets resolve against.
    pub site_base: BaseUrl,
}

impl RenderContext {
    pub fn new(site_base: BaseUrl) -> Self {
        Self { site_base }
    }
}

// --- Public API ---

/// Renders top-level nodes into a complete document.
///
/// Non-empty chunks are separated by a blank line; a document with no
/// textual content becomes the empty-document placeholder.
pub fn render_document(nodes: &[Node], config: &RenderContext) -> String {
    let renderer = MarkdownBlockRenderer::new(config);
    let mut output = String::with_capacity(nodes.len() * CHARS_PER_BLOCK_ESTIMATE);
    output.push_str(&renderer.render_siblings(nodes, FormatContext::new()));

    log::debug!(
        "Rendered {} top-level blocks into {} bytes",
        nodes.len(),
        output.len()
    );

    let trimmed = output.trim();
    if trimmed.is_empty() {
        EMPTY_DOCUMENT_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trait for formatting nodes into Markdown chunks.
pub trait BlockRenderer {
    /// Renders one node and its children; an empty string means nothing to emit.
    fn render_node(&self, node: &Node, context: FormatContext) -> String;

    /// Renders top-level siblings in order, separated by one blank line.
    fn render_siblings(&self, nodes: &[Node], context: FormatContext) -> String {
        nodes
            .iter()
            .map(|node| self.render_node(node, context))
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders nested siblings. Adjacent list items stay on consecutive
    /// lines; any other pair is separated by one blank line.
    fn render_children(&self, nodes: &[Node], context: FormatContext) -> String {
        let mut output = String::new();
        let mut previous_was_list = false;
        for node in nodes {
            let chunk = self.render_node(node, context);
            if chunk.is_empty() {
                continue;
            }
            let is_list = node.block.is_list_item();
            if !output.is_empty() {
                output.push_str(if previous_was_list && is_list { "\n" } else { "\n\n" });
            }
            output.push_str(&chunk);
            previous_was_list = is_list;
        }
        output
    }
}

/// Formats blocks as Markdown.
pub struct MarkdownBlockRenderer<'a> {
    config: &'a RenderContext,
}

impl BlockRenderer for MarkdownBlockRenderer<'_> {
    fn render_node(&self, node: &Node, context: FormatContext) -> String {
        let block = &node.block;

        if block.is_transparent() {
            return self.render_children(&node.children, context);
        }

        if let Block::Table(table) = block {
            return render_table(table, &node.children, &context);
        }

        let own = self.block_line(block, &context).unwrap_or_default();
        if node.children.is_empty() {
            return own;
        }

        let child_context = if block.indents_children() {
            context.indented()
        } else {
            context
        };
        let children = self.render_children(&node.children, child_context);

        match (own.is_empty(), children.is_empty()) {
            (_, true) => own,
            (true, false) => children,
            (false, false) => {
                let separator = if block.is_list_item() { "\n" } else { "\n\n" };
                format!("{}{}{}", own, separator, children)
            }
        }
    }
}

impl<'a> MarkdownBlockRenderer<'a> {
    pub fn new(config: &'a RenderContext) -> Self {
        Self { config }
    }

    /// The block's own output, without children. `None` means nothing to emit.
    pub fn block_line(&self, block: &Block, context: &FormatContext) -> Option<String> {
        match block {
            Block::Paragraph(b) => text_line(context, "", &b.content),
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                let prefix = format!("{} ", "#".repeat(b.level.clamp(1, 3) as usize));
                text_line(context, &prefix, &b.content)
            }
            Block::BulletedListItem(b) => text_line(context, "- ", &b.content),
            Block::NumberedListItem(b) => {
                let prefix = format!("{}. ", b.number.unwrap_or(1));
                text_line(context, &prefix, &b.content)
            }
            Block::ToDo(b) => {
                let mark = if b.checked { "x" } else { " " };
                let text = rich_text_to_markdown(&b.content.rich_text);
                Some(context.line(format!("- [{}] {}", mark, text).trim_end()))
            }
            Block::Toggle(b) => text_line(context, "- ", &b.content),
            Block::Quote(b) => text_line(context, "> ", &b.content),
            Block::Callout(b) => {
                let prefix = match &b.icon {
                    Some(Icon::Emoji { emoji }) if !emoji.is_empty() => format!("> {} ", emoji),
                    _ => "> ".to_string(),
                };
                text_line(context, &prefix, &b.content)
            }
            Block::Code(b) => self.format_code_block(b, context),
            Block::Equation(b) => {
                if b.expression.is_empty() {
                    return None;
                }
                Some(
                    [context.line("$$"), context.line(&b.expression), context.line("$$")]
                        .join("\n"),
                )
            }
            Block::Divider(_) => Some(context.line("---")),
            Block::WebLink(b) => {
                let url = b.url.as_deref().filter(|url| !url.is_empty())?;
                Some(context.line(format!("[{}]({})", b.kind.as_str(), url)))
            }
            Block::LinkToPage(b) => match &b.target {
                LinkTarget::PageId { page_id } if !page_id.is_empty() => Some(context.line(
                    format!("[link]({})", self.config.site_base.join(page_id.as_str())),
                )),
                _ => None,
            },
            Block::ChildPage(b) => {
                let title = b.title.trim();
                (!title.is_empty()).then(|| context.line(format!("## {}", title)))
            }
            Block::Image(b) => {
                let url = b.image.url()?;
                let caption = plain_text_of(&b.caption);
                let alt = if caption.is_empty() { "image" } else { caption.as_str() };
                Some(context.line(format!("![{}]({})", alt, url)))
            }
            Block::Other(b) => {
                let content = b.content.as_ref()?;
                text_line(context, "", content)
            }
            // Rendered by the node-level dispatch.
            Block::Table(_)
            | Block::TableRow(_)
            | Block::ColumnList(_)
            | Block::Column(_)
            | Block::Synced(_) => None,
        }
    }

    fn format_code_block(&self, code: &CodeBlock, context: &FormatContext) -> Option<String> {
        let body = plain_text_of(&code.content.rich_text);
        if body.is_empty() {
            return None;
        }
        let language = code
            .language
            .as_deref()
            .filter(|lang| !lang.trim().is_empty())
            .unwrap_or(DEFAULT_CODE_LANGUAGE);

        Some(format!(
            "{}\n{}\n{}",
            context.line(format!("```{}", language)),
            body,
            context.line("```")
        ))
    }
}

/// Prefix plus rendered text, or `None` when the text is empty.
fn text_line(context: &FormatContext, prefix: &str, content: &TextBlockContent) -> Option<String> {
    let text = rich_text_to_markdown(&content.rich_text);
    if text.is_empty() {
        return None;
    }
    Some(context.line(format!("{}{}", prefix, text)))
}
