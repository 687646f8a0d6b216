// src/formatting/mod.rs
//! Renders materialized block trees and pages into Markdown.

pub mod block_renderer;
mod page;
mod properties;
mod rich_text;
mod state;
mod table;

pub use self::block_renderer::{render_document, BlockRenderer, MarkdownBlockRenderer, RenderContext};
pub use self::page::compose_page_markdown;
pub use self::properties::{extract_title, render_property_value, select_printable_properties};
pub use self::rich_text::{render_segment, render_segments, rich_text_to_markdown, MarkdownStyleRenderer};
pub use self::state::FormatContext;
pub use self::table::{escape_for_table_cell, render_table, TableBuilder};
