use super::{NodeKind, RichTextItem};
use crate::constants::{UNTITLED_DATABASE, UNTITLED_PAGE};
use crate::types::NotionId;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A block as listed under a page or another block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBlock")]
pub struct Block {
    pub id: NotionId,
    pub has_children: bool,
    pub archived: bool,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: NotionId, kind: BlockKind) -> Self {
        Self {
            id,
            has_children: false,
            archived: false,
            kind,
        }
    }

    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    pub fn node_kind(&self) -> NodeKind {
        NodeKind::Block(self.block_type())
    }
}

/// The rich-text payload shared by every text-bearing block.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
}

impl TextContent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            rich_text: vec![RichTextItem::plain(text)],
        }
    }
}

/// Block represents the Notion block types the crawler distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextContent),
    Heading1(TextContent),
    Heading2(TextContent),
    Heading3(TextContent),
    BulletedListItem(TextContent),
    NumberedListItem(TextContent),
    ToDo(TextContent),
    Toggle(TextContent),
    Quote(TextContent),
    Callout(TextContent),
    Code(TextContent),
    Template(TextContent),
    ChildPage { title: String },
    ChildDatabase { title: String },
    Divider,
    /// Any other block type; keeps inline text if the payload carries some.
    Unsupported {
        block_type: String,
        rich_text: Vec<RichTextItem>,
    },
    /// A known text block whose payload could not be decoded.
    Malformed { block_type: String, reason: String },
}

/// Fieldless tag of a [`BlockKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    Quote,
    Callout,
    Code,
    Template,
    ChildPage,
    ChildDatabase,
    Divider,
    Unsupported,
    Malformed,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading_1",
            BlockType::Heading2 => "heading_2",
            BlockType::Heading3 => "heading_3",
            BlockType::BulletedListItem => "bulleted_list_item",
            BlockType::NumberedListItem => "numbered_list_item",
            BlockType::ToDo => "to_do",
            BlockType::Toggle => "toggle",
            BlockType::Quote => "quote",
            BlockType::Callout => "callout",
            BlockType::Code => "code",
            BlockType::Template => "template",
            BlockType::ChildPage => "child_page",
            BlockType::ChildDatabase => "child_database",
            BlockType::Divider => "divider",
            BlockType::Unsupported => "unsupported",
            BlockType::Malformed => "malformed",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Paragraph(_) => BlockType::Paragraph,
            BlockKind::Heading1(_) => BlockType::Heading1,
            BlockKind::Heading2(_) => BlockType::Heading2,
            BlockKind::Heading3(_) => BlockType::Heading3,
            BlockKind::BulletedListItem(_) => BlockType::BulletedListItem,
            BlockKind::NumberedListItem(_) => BlockType::NumberedListItem,
            BlockKind::ToDo(_) => BlockType::ToDo,
            BlockKind::Toggle(_) => BlockType::Toggle,
            BlockKind::Quote(_) => BlockType::Quote,
            BlockKind::Callout(_) => BlockType::Callout,
            BlockKind::Code(_) => BlockType::Code,
            BlockKind::Template(_) => BlockType::Template,
            BlockKind::ChildPage { .. } => BlockType::ChildPage,
            BlockKind::ChildDatabase { .. } => BlockType::ChildDatabase,
            BlockKind::Divider => BlockType::Divider,
            BlockKind::Unsupported { .. } => BlockType::Unsupported,
            BlockKind::Malformed { .. } => BlockType::Malformed,
        }
    }

    /// Shorthand for a paragraph holding a single plain-text run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        BlockKind::Paragraph(TextContent::plain(text))
    }
}

/// Wire shape of a block: the payload sits under a key named after `type`.
#[derive(Deserialize)]
struct RawBlock {
    id: NotionId,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(default)]
    archived: bool,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl From<RawBlock> for Block {
    fn from(mut raw: RawBlock) -> Self {
        let data = raw.payload.remove(&raw.block_type).unwrap_or(Value::Null);
        let kind = decode_kind(&raw.block_type, &data);
        Block {
            id: raw.id,
            has_children: raw.has_children,
            archived: raw.archived,
            kind,
        }
    }
}

fn decode_kind(block_type: &str, data: &Value) -> BlockKind {
    let text = |wrap: fn(TextContent) -> BlockKind| match TextContent::deserialize(data) {
        Ok(content) => wrap(content),
        Err(e) => BlockKind::Malformed {
            block_type: block_type.to_string(),
            reason: e.to_string(),
        },
    };
    let title_or = |fallback: &str| {
        data.get("title")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };

    match block_type {
        "paragraph" => text(BlockKind::Paragraph),
        "heading_1" => text(BlockKind::Heading1),
        "heading_2" => text(BlockKind::Heading2),
        "heading_3" => text(BlockKind::Heading3),
        "bulleted_list_item" => text(BlockKind::BulletedListItem),
        "numbered_list_item" => text(BlockKind::NumberedListItem),
        "to_do" => text(BlockKind::ToDo),
        "toggle" => text(BlockKind::Toggle),
        "quote" => text(BlockKind::Quote),
        "callout" => text(BlockKind::Callout),
        "code" => text(BlockKind::Code),
        "template" => text(BlockKind::Template),
        "child_page" => BlockKind::ChildPage {
            title: title_or(UNTITLED_PAGE),
        },
        "child_database" => BlockKind::ChildDatabase {
            title: title_or(UNTITLED_DATABASE),
        },
        "divider" => BlockKind::Divider,
        other => BlockKind::Unsupported {
            block_type: other.to_string(),
            rich_text: data
                .get("rich_text")
                .and_then(|rt| Vec::<RichTextItem>::deserialize(rt).ok())
                .unwrap_or_default(),
        },
    }
}
