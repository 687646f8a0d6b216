use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::WebLink($pattern) => $result,
            Block::LinkToPage($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Other($pattern) => $result,
        }
    };
}

/// Block represents the Notion block types this crate renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(DividerBlock),
    WebLink(WebLinkBlock),
    LinkToPage(LinkToPageBlock),
    ChildPage(ChildPageBlock),
    Image(ImageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Synced(SyncedBlock),
    Other(OtherBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        &self.common().id
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get block type name as the API spells it
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Divider(_) => "divider",
            Block::WebLink(b) => b.kind.as_str(),
            Block::LinkToPage(_) => "link_to_page",
            Block::ChildPage(_) => "child_page",
            Block::Image(_) => "image",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Synced(_) => "synced_block",
            Block::Other(b) => &b.block_type,
        }
    }

    /// The id whose children belong under this block in the rendered tree.
    ///
    /// A synced duplicate borrows the children of the block it points at;
    /// any other block with children is expanded from its own id.
    pub fn expansion_source(&self) -> Option<&BlockId> {
        if let Block::Synced(SyncedBlock {
            synced_from: Some(from),
            ..
        }) = self
        {
            if !from.block_id.is_empty() {
                return Some(&from.block_id);
            }
        }

        self.has_children().then(|| self.id())
    }

    /// The run list carried by text-bearing blocks.
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        let content = match self {
            Block::Paragraph(b) => &b.content,
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => &b.content,
            Block::BulletedListItem(b) => &b.content,
            Block::NumberedListItem(b) => &b.content,
            Block::ToDo(b) => &b.content,
            Block::Toggle(b) => &b.content,
            Block::Quote(b) => &b.content,
            Block::Callout(b) => &b.content,
            Block::Code(b) => &b.content,
            Block::Other(b) => b.content.as_ref()?,
            _ => return None,
        };
        Some(&content.rich_text)
    }

    /// Containers that contribute no line of their own.
    pub fn is_transparent(&self) -> bool {
        matches!(
            self,
            Block::ColumnList(_) | Block::Column(_) | Block::Synced(_)
        )
    }

    /// List-style items keep their children directly under their own line.
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            Block::BulletedListItem(_) | Block::NumberedListItem(_) | Block::ToDo(_)
        )
    }

    /// Blocks whose children render one indentation level deeper.
    pub fn indents_children(&self) -> bool {
        self.is_list_item()
            || matches!(
                self,
                Block::Quote(_) | Block::Callout(_) | Block::Toggle(_)
            )
    }
}
