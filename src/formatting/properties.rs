// src/formatting/properties.rs
//! Renders page properties as the value half of a `name: value` line.

use crate::model::{plain_text, DateRange, PropertyField, PropertyValue};

/// Renders a property value as plain text.
///
/// Infallible. An empty string means "nothing worth a line"; a payload that
/// failed to decode renders as a visible parse-error marker.
pub fn render_property(field: &PropertyField) -> String {
    match field {
        PropertyField::Parsed(value) => render_value(value),
        PropertyField::Malformed(err) => format!("[property parse error: {}]", err),
    }
}

fn render_value(value: &PropertyValue) -> String {
    use PropertyValue::*;

    match value {
        Title { title } => plain_text(title),
        RichText { rich_text } => plain_text(rich_text),
        Select { select } | Status { status: select } => select
            .as_ref()
            .map(|option| option.name.clone())
            .unwrap_or_default(),
        MultiSelect { multi_select } => join(multi_select.iter().map(|o| o.name.as_str())),
        People { people } => join(people.iter().filter_map(|p| p.name.as_deref())),
        Relation { relation } => join(relation.iter().map(|r| r.id.as_str())),
        Number { number } => number.as_ref().map(|n| n.to_string()).unwrap_or_default(),
        Date { date } => date.as_ref().map(format_date).unwrap_or_default(),
        Url { url } => url.clone().unwrap_or_default(),
        Email { email } => email.clone().unwrap_or_default(),
        PhoneNumber { phone_number } => phone_number.clone().unwrap_or_default(),
        Checkbox { checkbox } => checkbox.to_string(),
        Unsupported => String::new(),
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_date(range: &DateRange) -> String {
    match (range.start.as_deref(), range.end.as_deref()) {
        (Some(start), Some(end)) => format!("{} -> {}", start, end),
        (Some(start), None) => start.to_string(),
        (None, Some(end)) => end.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropertyParseError;
    use crate::model::{RelationRef, RichTextItem, SelectOption, User};

    fn parsed(value: PropertyValue) -> String {
        render_property(&PropertyField::Parsed(value))
    }

    #[test]
    fn text_properties_flatten_rich_text() {
        assert_eq!(parsed(PropertyValue::title("Intro")), "Intro");
        assert_eq!(
            parsed(PropertyValue::RichText {
                rich_text: vec![RichTextItem::plain("a"), RichTextItem::plain("b")]
            }),
            "ab"
        );
    }

    #[test]
    fn option_properties_render_names() {
        assert_eq!(
            parsed(PropertyValue::Select {
                select: Some(SelectOption {
                    name: "Done".to_string()
                })
            }),
            "Done"
        );
        assert_eq!(parsed(PropertyValue::Status { status: None }), "");
        assert_eq!(
            parsed(PropertyValue::MultiSelect {
                multi_select: vec![
                    SelectOption {
                        name: "rust".to_string()
                    },
                    SelectOption {
                        name: "notion".to_string()
                    }
                ]
            }),
            "rust, notion"
        );
        assert_eq!(
            parsed(PropertyValue::People {
                people: vec![
                    User {
                        name: Some("Ada".to_string())
                    },
                    User { name: None }
                ]
            }),
            "Ada"
        );
        assert_eq!(
            parsed(PropertyValue::Relation {
                relation: vec![RelationRef {
                    id: "abc".to_string()
                }]
            }),
            "abc"
        );
    }

    #[test]
    fn scalar_properties() {
        assert_eq!(
            parsed(PropertyValue::Number {
                number: Some(serde_json::Number::from(42))
            }),
            "42"
        );
        assert_eq!(parsed(PropertyValue::Number { number: None }), "");
        assert_eq!(
            parsed(PropertyValue::Date {
                date: Some(DateRange {
                    start: Some("2024-01-01".to_string()),
                    end: Some("2024-01-03".to_string())
                })
            }),
            "2024-01-01 -> 2024-01-03"
        );
        assert_eq!(parsed(PropertyValue::Checkbox { checkbox: false }), "false");
        assert_eq!(parsed(PropertyValue::Url { url: None }), "");
        assert_eq!(parsed(PropertyValue::Unsupported), "");
    }

    #[test]
    fn malformed_property_renders_marker() {
        let field = PropertyField::Malformed(PropertyParseError {
            type_name: "checkbox".to_string(),
            reason: "invalid type".to_string(),
        });
        assert_eq!(
            render_property(&field),
            "[property parse error: checkbox: invalid type]"
        );
    }
}
