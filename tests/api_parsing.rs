// tests/api_parsing.rs
//! Parsing recorded API responses into the crawl model.

use notion_harvest::{
    block_text, parse_blocks_pagination, parse_database_response, parse_page_response,
    render_property, ApiResponse, BlockKind, BlockType, FetchError, PropertyField,
    PropertyValue,
};
use reqwest::StatusCode;

fn ok(body: &str) -> ApiResponse<String> {
    ApiResponse {
        data: body.to_string(),
        status: StatusCode::OK,
        url: "https://api.notion.com/v1/test".to_string(),
        retry_after: None,
    }
}

mod page_parsing_tests {
    use super::*;

    const PAGE: &str = include_str!("fixtures/api_responses/page_reading_list_entry.json");

    #[test]
    fn parse_database_entry_page() {
        let page = parse_page_response(ok(PAGE)).expect("page parses");

        assert_eq!(page.id.as_str(), "a1d8f3c2-7b9e-4f6a-8c5d-2e1b0f9a7c63");
        assert_eq!(page.title(), "Designing Data-Intensive Applications");
        assert!(page.is_page_object());
        assert!(!page.archived);
        assert_eq!(
            page.url.as_deref(),
            Some("https://www.notion.so/Designing-Data-Intensive-Applications-a1d8f3c27b9e4f6a8c5d2e1b0f9a7c63")
        );
    }

    #[test]
    fn properties_keep_response_order_and_render() {
        let page = parse_page_response(ok(PAGE)).unwrap();

        let rendered: Vec<(String, String)> = page
            .properties
            .iter()
            .map(|(name, field)| (name.clone(), render_property(field)))
            .collect();

        let expected = vec![
            ("Name", "Designing Data-Intensive Applications"),
            ("Status", "Reading"),
            ("Tags", "databases, distributed systems"),
            ("Pages", "616"),
            ("Started", "2024-03-11 -> 2024-04-30"),
            ("Owned", "true"),
            ("Notes", ""),
            ("Score", ""),
        ];
        for (i, (name, value)) in expected.into_iter().enumerate() {
            assert_eq!(rendered[i], (name.to_string(), value.to_string()));
        }
    }

    #[test]
    fn unexpected_property_shape_is_isolated() {
        let page = parse_page_response(ok(PAGE)).unwrap();

        assert!(matches!(
            page.properties.get("Score"),
            Some(PropertyField::Parsed(PropertyValue::Unsupported))
        ));
        match page.properties.get("Reviewer") {
            Some(PropertyField::Malformed(err)) => assert_eq!(err.type_name, "people"),
            other => panic!("expected malformed people property, got {:?}", other),
        }
        let marker = render_property(&page.properties["Reviewer"]);
        assert!(marker.starts_with("[property parse error: people: "));
    }
}

mod database_parsing_tests {
    use super::*;

    #[test]
    fn parse_database_title() {
        let json = include_str!("fixtures/api_responses/database_reading_list.json");
        let database = parse_database_response(ok(json)).expect("database parses");

        assert_eq!(database.id.as_str(), "5e7c1b94-0d2f-4a83-b6e1-9f3c8a2d4b70");
        assert_eq!(database.title(), "Reading list");
        assert!(!database.is_linked());
    }

    #[test]
    fn linked_database_error_is_recognised() {
        let json = include_str!("fixtures/api_responses/error_linked_database.json");
        let response = ApiResponse {
            data: json.to_string(),
            status: StatusCode::BAD_REQUEST,
            url: "https://api.notion.com/v1/databases/9b8a7c6d".to_string(),
            retry_after: None,
        };

        let err = parse_database_response(response).unwrap_err();
        assert!(matches!(err, FetchError::Validation { .. }));
        assert!(err.is_linked_database());
        assert!(err.suggests_other_kind());
    }
}

mod block_parsing_tests {
    use super::*;

    const BLOCKS: &str = include_str!("fixtures/api_responses/block_children_mixed.json");

    #[test]
    fn pagination_envelope_is_read() {
        let page = parse_blocks_pagination(ok(BLOCKS)).expect("blocks parse");

        assert_eq!(page.results.len(), 7);
        assert!(page.has_more);
        assert_eq!(
            page.next_cursor.as_deref(),
            Some("2c4d6e8f-0a1b-4c3d-9e5f-7a9b1c3d5e7f")
        );
    }

    #[test]
    fn block_kinds_and_text() {
        let blocks = parse_blocks_pagination(ok(BLOCKS)).unwrap().results;

        let types: Vec<BlockType> = blocks.iter().map(|b| b.block_type()).collect();
        assert_eq!(
            types,
            vec![
                BlockType::Heading2,
                BlockType::BulletedListItem,
                BlockType::ChildPage,
                BlockType::ChildDatabase,
                BlockType::Divider,
                BlockType::Malformed,
                BlockType::Unsupported,
            ]
        );

        assert_eq!(block_text(&blocks[0].kind), "Chapter notes");
        assert_eq!(block_text(&blocks[1].kind), "Replication lag");
        assert!(blocks[1].has_children);
        assert_eq!(
            blocks[2].kind,
            BlockKind::ChildPage {
                title: "Quotes".to_string()
            }
        );
        assert_eq!(block_text(&blocks[2].kind), "");
        assert_eq!(block_text(&blocks[4].kind), "");
        assert!(block_text(&blocks[5].kind).starts_with("[block parse error: to_do: "));
        assert_eq!(block_text(&blocks[6].kind), "");
    }
}
