// src/formatting/block_text.rs
//! Extracts the inline text of a block.

use crate::model::{plain_text, BlockKind};

/// The plain text a block contributes to the corpus.
///
/// Child pages, child databases and dividers carry no inline text and
/// yield an empty string, as do blocks without any rich text.
pub fn block_text(kind: &BlockKind) -> String {
    use BlockKind::*;

    match kind {
        Paragraph(content)
        | Heading1(content)
        | Heading2(content)
        | Heading3(content)
        | BulletedListItem(content)
        | NumberedListItem(content)
        | ToDo(content)
        | Toggle(content)
        | Quote(content)
        | Callout(content)
        | Code(content)
        | Template(content) => plain_text(&content.rich_text),
        Unsupported { rich_text, .. } => plain_text(rich_text),
        Malformed { block_type, reason } => {
            format!("[block parse error: {}: {}]", block_type, reason)
        }
        ChildPage { .. } | ChildDatabase { .. } | Divider => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RichTextItem, TextContent};

    #[test]
    fn rich_text_parts_are_concatenated() {
        let kind = BlockKind::Paragraph(TextContent {
            rich_text: vec![RichTextItem::plain("Hello "), RichTextItem::plain("world")],
        });
        assert_eq!(block_text(&kind), "Hello world");
    }

    #[test]
    fn structural_blocks_have_no_text() {
        assert_eq!(block_text(&BlockKind::Divider), "");
        assert_eq!(
            block_text(&BlockKind::ChildPage {
                title: "Sub".to_string()
            }),
            ""
        );
        assert_eq!(
            block_text(&BlockKind::Unsupported {
                block_type: "image".to_string(),
                rich_text: Vec::new()
            }),
            ""
        );
    }

    #[test]
    fn malformed_blocks_render_marker() {
        let kind = BlockKind::Malformed {
            block_type: "quote".to_string(),
            reason: "expected a sequence".to_string(),
        };
        assert_eq!(
            block_text(&kind),
            "[block parse error: quote: expected a sequence]"
        );
    }
}
