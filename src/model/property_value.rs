use super::RichTextItem;
use crate::error::PropertyParseError;
use serde::{Deserialize, Deserializer, Serialize};

/// A page property as it arrived from the API.
///
/// Decoding happens per property so that one unexpected payload cannot
/// take the whole page down with it.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyField {
    Parsed(PropertyValue),
    Malformed(PropertyParseError),
}

impl<'de> Deserialize<'de> for PropertyField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match PropertyValue::deserialize(&raw) {
            Ok(value) => PropertyField::Parsed(value),
            Err(e) => PropertyField::Malformed(PropertyParseError {
                type_name: raw
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("unknown")
                    .to_string(),
                reason: e.to_string(),
            }),
        })
    }
}

impl From<PropertyValue> for PropertyField {
    fn from(value: PropertyValue) -> Self {
        PropertyField::Parsed(value)
    }
}

/// The typed value of a page property, tagged by the API's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        title: Vec<RichTextItem>,
    },
    RichText {
        rich_text: Vec<RichTextItem>,
    },
    Select {
        select: Option<SelectOption>,
    },
    MultiSelect {
        multi_select: Vec<SelectOption>,
    },
    People {
        people: Vec<User>,
    },
    Relation {
        relation: Vec<RelationRef>,
    },
    Status {
        status: Option<SelectOption>,
    },
    Number {
        number: Option<serde_json::Number>,
    },
    Date {
        date: Option<DateRange>,
    },
    Url {
        url: Option<String>,
    },
    Email {
        email: Option<String>,
    },
    PhoneNumber {
        phone_number: Option<String>,
    },
    Checkbox {
        checkbox: bool,
    },
    /// Formulas, rollups, files and every type added to the API later.
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Shorthand for a title property holding a single plain-text run.
    pub fn title(text: impl Into<String>) -> Self {
        PropertyValue::Title {
            title: vec![RichTextItem::plain(text)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}
