// src/formatting/table.rs
//! Pipe-table rendering for `table` blocks and their `table_row` children.

use super::rich_text::rich_text_to_markdown;
use super::state::FormatContext;
use crate::constants::EMPTY_TABLE_PLACEHOLDER;
use crate::model::{Block, Node, TableBlock};

/// Escapes characters that would break a pipe-table cell.
pub fn escape_for_table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

/// Builds a Markdown table from rows of rendered cells.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    width: usize,
    has_column_header: bool,
    has_row_header: bool,
    rows: Vec<Vec<String>>,
}

impl TableBuilder {
    pub fn new(table: &TableBlock) -> Self {
        Self {
            width: table.table_width,
            has_column_header: table.has_column_header,
            has_row_header: table.has_row_header,
            rows: Vec::new(),
        }
    }

    /// Adds a row; the table widens to fit the longest row.
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.width = self.width.max(cells.len());
        self.rows.push(cells);
    }

    /// Renders the table with every line prefixed by the context's padding.
    pub fn render(self, context: &FormatContext) -> String {
        if self.rows.is_empty() || self.width == 0 {
            return context.line(EMPTY_TABLE_PLACEHOLDER);
        }

        let width = self.width;
        let mut rows: Vec<Vec<String>> = self
            .rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        let header = if self.has_column_header {
            rows.remove(0)
        } else {
            vec![String::new(); width]
        };

        if self.has_row_header {
            for row in rows.iter_mut() {
                if let Some(first) = row.first_mut() {
                    *first = if first.is_empty() {
                        "** **".to_string()
                    } else {
                        format!("**{}**", first)
                    };
                }
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(context.line(pipe_row(&header)));
        lines.push(context.line(pipe_row(&vec!["---".to_string(); width])));
        lines.extend(rows.iter().map(|row| context.line(pipe_row(row))));
        lines.join("\n")
    }
}

fn pipe_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Renders a table block from its `table_row` children; other children are ignored.
pub fn render_table(table: &TableBlock, children: &[Node], context: &FormatContext) -> String {
    let mut builder = TableBuilder::new(table);
    for child in children {
        if let Block::TableRow(row) = &child.block {
            builder.push_row(
                row.cells
                    .iter()
                    .map(|cell| escape_for_table_cell(&rich_text_to_markdown(cell)))
                    .collect(),
            );
        }
    }
    builder.render(context)
}
