//! Plain text extraction
//!
//! One row per non-blank text node, skipping content that is never rendered.

use scraper::{ElementRef, Node};

use super::{normalize_ws, ExtractionResult, ModeKind};
use crate::document::Document;
use crate::error::ExtractError;

/// Elements whose text is not visible page content
const HIDDEN: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Extract visible text nodes in document order
pub fn extract_text(doc: &Document) -> Result<ExtractionResult, ExtractError> {
    let mut result = ExtractionResult::new(ModeKind::Text);

    for node in doc.html().tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let content = normalize_ws(text);
        if content.is_empty() {
            continue;
        }

        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| HIDDEN.contains(&el.value().name()));
        if !hidden {
            result.push_row(vec![content]);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Column;

    #[test]
    fn test_text_nodes_in_order() {
        let html = r#"
        <html>
        <head><title>Ignored title</title><style>body { color: red; }</style></head>
        <body>
            <h1>Welcome</h1>
            <p>First   paragraph
               spans lines.</p>
            <script>var x = "hidden";</script>
            <ul><li>One</li><li>Two</li></ul>
        </body>
        </html>
        "#;

        let doc = Document::from_html(html);
        let result = extract_text(&doc).unwrap();
        let content: Vec<&str> = result
            .rows()
            .iter()
            .filter_map(|r| r.get(Column::Content))
            .collect();
        assert_eq!(content, vec!["Welcome", "First paragraph spans lines.", "One", "Two"]);
    }

    #[test]
    fn test_inline_markup_splits_nodes() {
        let doc = Document::from_html("<p>Buy <b>now</b> today</p>");
        let result = extract_text(&doc).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.rows()[1].get(Column::Content), Some("now"));
    }
}
