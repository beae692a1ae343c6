// src/model/mod.rs
//! The Notion objects the crawler reads: pages, databases and blocks.
//!
//! These types deserialize straight from API JSON. Only the fields the
//! corpus needs are modelled; everything else in a response is ignored.

mod block;
mod property_value;
mod rich_text;

pub use block::{Block, BlockKind, BlockType, TextContent};
pub use property_value::{
    DateRange, PropertyField, PropertyValue, RelationRef, SelectOption, User,
};
pub use rich_text::{plain_text, RichTextItem};

use crate::constants::{UNTITLED_DATABASE, UNTITLED_PAGE};
use crate::types::NotionId;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// A Notion page, either standalone or a database entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    /// The `object` tag of the listing item, `"page"` for every real page.
    #[serde(default = "page_object")]
    pub object: String,
    pub id: NotionId,
    /// Properties in the order the API returned them.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyField>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

fn page_object() -> String {
    "page".to_string()
}

impl Page {
    pub fn new(id: NotionId) -> Self {
        Self {
            object: page_object(),
            id,
            properties: IndexMap::new(),
            url: None,
            archived: false,
        }
    }

    /// Appends a property, keeping insertion order.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyField>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// The text of the first title-typed property, or a placeholder.
    pub fn title(&self) -> String {
        self.properties
            .values()
            .find_map(|field| match field {
                PropertyField::Parsed(PropertyValue::Title { title }) => Some(plain_text(title)),
                _ => None,
            })
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| UNTITLED_PAGE.to_string())
    }

    pub fn is_page_object(&self) -> bool {
        self.object == "page"
    }
}

/// Whether a database owns its rows or mirrors another database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseSource {
    #[default]
    Original,
    /// A linked view over another database's rows.
    Linked,
}

/// A Notion database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Database {
    pub id: NotionId,
    #[serde(default)]
    pub title: Vec<RichTextItem>,
    #[serde(skip)]
    pub source: DatabaseSource,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl Database {
    pub fn new(id: NotionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: vec![RichTextItem::plain(title)],
            source: DatabaseSource::Original,
            url: None,
            archived: false,
        }
    }

    /// A database the API only exposes as a linked view.
    pub fn linked(id: NotionId) -> Self {
        Self {
            id,
            title: Vec::new(),
            source: DatabaseSource::Linked,
            url: None,
            archived: false,
        }
    }

    pub fn title(&self) -> String {
        let title = plain_text(&self.title);
        if title.trim().is_empty() {
            UNTITLED_DATABASE.to_string()
        } else {
            title
        }
    }

    pub fn is_linked(&self) -> bool {
        self.source == DatabaseSource::Linked
    }
}

/// What an id turned out to be once the API was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Page,
    Database,
    LinkedDatabase,
    /// A plain content block; never a traversal root of its own.
    Block(BlockType),
    Unknown,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Page => write!(f, "page"),
            NodeKind::Database => write!(f, "database"),
            NodeKind::LinkedDatabase => write!(f, "linked database"),
            NodeKind::Block(block_type) => write!(f, "block ({})", block_type),
            NodeKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id() -> NotionId {
        NotionId::parse("59833787-2cf9-4fdf-8782-e53db20768a5").unwrap()
    }

    #[test]
    fn page_title_comes_from_title_property() {
        let page: Page = serde_json::from_str(
            r#"{
                "object": "page",
                "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
                "properties": {
                    "Tags": {"id": "t", "type": "multi_select", "multi_select": []},
                    "Name": {"id": "title", "type": "title", "title": [
                        {"plain_text": "Tuscan "}, {"plain_text": "kale"}
                    ]}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(page.title(), "Tuscan kale");
        let names: Vec<_> = page.properties.keys().cloned().collect();
        assert_eq!(names, vec!["Tags", "Name"]);
    }

    #[test]
    fn missing_titles_fall_back_to_placeholders() {
        assert_eq!(Page::new(id()).title(), UNTITLED_PAGE);
        let db: Database = serde_json::from_value(json!({
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "title": []
        }))
        .unwrap();
        assert_eq!(db.title(), UNTITLED_DATABASE);
        assert!(!db.is_linked());
        assert!(Database::linked(id()).is_linked());
    }

    #[test]
    fn plain_blocks_report_their_subtype() {
        let block = Block::new(id(), BlockKind::paragraph("hi"));
        assert_eq!(block.node_kind(), NodeKind::Block(BlockType::Paragraph));
        assert_eq!(block.node_kind().to_string(), "block (paragraph)");
    }
}
