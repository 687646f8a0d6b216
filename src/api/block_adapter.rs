// src/api/block_adapter.rs
//! Adapter layer for converting raw block JSON into the domain model.
//!
//! Every child entry arrives as an object with an `id`, a `type` and a
//! payload keyed by that type. Known types are validated here so a broken
//! entry becomes exactly one [`MalformedBlock`] instead of failing later
//! during rendering.

use crate::error::MalformedBlock;
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::Block;
use crate::types::RichTextItem;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Envelope shared by every block object.
#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(flatten)]
    payloads: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ToDoPayload {
    #[serde(flatten)]
    content: TextBlockContent,
    #[serde(default)]
    checked: bool,
}

#[derive(Debug, Deserialize)]
struct CalloutPayload {
    #[serde(flatten)]
    content: TextBlockContent,
    #[serde(default)]
    icon: Option<Icon>,
}

#[derive(Debug, Deserialize)]
struct CodePayload {
    #[serde(flatten)]
    content: TextBlockContent,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EquationPayload {
    #[serde(default)]
    expression: String,
}

#[derive(Debug, Deserialize)]
struct WebLinkPayload {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChildPagePayload {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct CaptionPayload {
    #[serde(default)]
    caption: Vec<RichTextItem>,
}

#[derive(Debug, Deserialize)]
struct TablePayload {
    #[serde(default)]
    table_width: usize,
    #[serde(default)]
    has_column_header: bool,
    #[serde(default)]
    has_row_header: bool,
}

#[derive(Debug, Deserialize)]
struct TableRowPayload {
    #[serde(default)]
    cells: Vec<Vec<RichTextItem>>,
}

#[derive(Debug, Deserialize)]
struct SyncedPayload {
    #[serde(default)]
    synced_from: Option<SyncedFrom>,
}

/// Converts one raw child entry into a [`Block`].
///
/// `position` names the entry in errors when it carries no id.
pub fn convert_block(raw: &Value, position: usize) -> Result<Block, MalformedBlock> {
    let envelope: RawBlock =
        serde_json::from_value(raw.clone()).map_err(|e| MalformedBlock {
            id: entry_label(raw, position),
            block_type: raw
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            reason: e.to_string(),
        })?;

    if envelope.id.trim().is_empty() {
        return Err(MalformedBlock {
            id: entry_label(raw, position),
            block_type: envelope.block_type,
            reason: "missing block id".to_string(),
        });
    }

    let RawBlock {
        id,
        block_type,
        has_children,
        mut payloads,
    } = envelope;
    let common = BlockCommon::new(id).with_children(has_children);
    let payload = payloads.remove(&block_type);

    let decoder = PayloadDecoder {
        id: common.id.to_string(),
        block_type: &block_type,
        payload,
    };

    let block = match block_type.as_str() {
        "paragraph" => Block::Paragraph(ParagraphBlock {
            content: decoder.required()?,
            common,
        }),
        "heading_1" => Block::Heading1(heading(common, 1, decoder.required()?)),
        "heading_2" => Block::Heading2(heading(common, 2, decoder.required()?)),
        "heading_3" => Block::Heading3(heading(common, 3, decoder.required()?)),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
            content: decoder.required()?,
            common,
        }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
            content: decoder.required()?,
            number: None,
            common,
        }),
        "to_do" => {
            let payload: ToDoPayload = decoder.required()?;
            Block::ToDo(ToDoBlock {
                common,
                content: payload.content,
                checked: payload.checked,
            })
        }
        "toggle" => Block::Toggle(ToggleBlock {
            content: decoder.required()?,
            common,
        }),
        "quote" => Block::Quote(QuoteBlock {
            content: decoder.required()?,
            common,
        }),
        "callout" => {
            let payload: CalloutPayload = decoder.required()?;
            Block::Callout(CalloutBlock {
                common,
                icon: payload.icon,
                content: payload.content,
            })
        }
        "code" => {
            let payload: CodePayload = decoder.required()?;
            Block::Code(CodeBlock {
                common,
                language: payload.language.filter(|l| !l.is_empty()),
                content: payload.content,
            })
        }
        "equation" => {
            let payload: EquationPayload = decoder.required()?;
            Block::Equation(EquationBlock {
                common,
                expression: payload.expression,
            })
        }
        "divider" => Block::Divider(DividerBlock { common }),
        "bookmark" | "embed" | "link_preview" => {
            let kind = match block_type.as_str() {
                "bookmark" => WebLinkKind::Bookmark,
                "embed" => WebLinkKind::Embed,
                _ => WebLinkKind::LinkPreview,
            };
            let payload: WebLinkPayload = decoder.optional()?;
            Block::WebLink(WebLinkBlock {
                common,
                kind,
                url: payload.url.filter(|u| !u.is_empty()),
            })
        }
        "link_to_page" => Block::LinkToPage(LinkToPageBlock {
            target: decoder.required()?,
            common,
        }),
        "child_page" => {
            let payload: ChildPagePayload = decoder.optional()?;
            Block::ChildPage(ChildPageBlock {
                common,
                title: payload.title,
            })
        }
        "image" => {
            let image: FileObject = decoder.required()?;
            let caption: CaptionPayload = decoder.required()?;
            Block::Image(ImageBlock {
                common,
                image,
                caption: caption.caption,
            })
        }
        "table" => {
            let payload: TablePayload = decoder.required()?;
            Block::Table(TableBlock {
                common,
                table_width: payload.table_width,
                has_column_header: payload.has_column_header,
                has_row_header: payload.has_row_header,
            })
        }
        "table_row" => {
            let payload: TableRowPayload = decoder.required()?;
            Block::TableRow(TableRowBlock {
                common,
                cells: payload.cells,
            })
        }
        "column_list" => Block::ColumnList(ColumnListBlock { common }),
        "column" => Block::Column(ColumnBlock { common }),
        "synced_block" => {
            let payload: SyncedPayload = decoder.optional()?;
            Block::Synced(SyncedBlock {
                common,
                synced_from: payload.synced_from,
            })
        }
        _ => Block::Other(OtherBlock {
            content: decoder.lenient_text(),
            block_type: block_type.clone(),
            common,
        }),
    };

    Ok(block)
}

fn heading(common: BlockCommon, level: u8, content: TextBlockContent) -> HeadingBlock {
    HeadingBlock {
        common,
        level,
        content,
    }
}

fn entry_label(raw: &Value, position: usize) -> String {
    match raw.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("#{}", position),
    }
}

/// Decodes the type-keyed payload of one entry.
struct PayloadDecoder<'a> {
    id: String,
    block_type: &'a str,
    payload: Option<Value>,
}

impl PayloadDecoder<'_> {
    fn malformed(&self, reason: impl Into<String>) -> MalformedBlock {
        MalformedBlock {
            id: self.id.clone(),
            block_type: self.block_type.to_string(),
            reason: reason.into(),
        }
    }

    /// The payload must be present and well-formed.
    fn required<T: DeserializeOwned>(&self) -> Result<T, MalformedBlock> {
        let payload = self
            .payload
            .as_ref()
            .ok_or_else(|| self.malformed(format!("missing `{}` payload", self.block_type)))?;
        serde_json::from_value(payload.clone()).map_err(|e| self.malformed(e.to_string()))
    }

    /// A missing payload reads as an empty object; a present one must be well-formed.
    fn optional<T: DeserializeOwned>(&self) -> Result<T, MalformedBlock> {
        let payload = match &self.payload {
            Some(Value::Null) | None => Value::Object(Map::new()),
            Some(payload) => payload.clone(),
        };
        serde_json::from_value(payload).map_err(|e| self.malformed(e.to_string()))
    }

    /// Text of a block type without dedicated handling, when it carries any.
    fn lenient_text(&self) -> Option<TextBlockContent> {
        let payload = self.payload.as_ref()?.as_object()?;
        if !payload.contains_key("rich_text") && !payload.contains_key("text") {
            return None;
        }
        match serde_json::from_value(Value::Object(payload.clone())) {
            Ok(content) => Some(content),
            Err(e) => {
                log::debug!(
                    "Ignoring unreadable text of {} block {}: {}",
                    self.block_type,
                    self.id,
                    e
                );
                None
            }
        }
    }
}
