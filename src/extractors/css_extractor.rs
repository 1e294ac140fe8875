//! CSS selector-based extraction
//!
//! Uses the scraper crate to select elements by a user-supplied selector.

use super::{compile_selector, ExtractionResult, ModeKind};
use crate::document::Document;
use crate::error::ExtractError;

/// Extract every element matching `selector_str`.
/// Rows hold the trimmed text and the outer HTML of each match.
pub fn extract_custom(doc: &Document, selector_str: &str) -> Result<ExtractionResult, ExtractError> {
    let selector_str = selector_str.trim();
    if selector_str.is_empty() {
        return Err(ExtractError::MissingSelector);
    }

    let selector = compile_selector(selector_str).map_err(ExtractError::InvalidSelector)?;

    let mut result = ExtractionResult::new(ModeKind::CustomSelector);
    for el in doc.html().select(&selector) {
        let text = el.text().collect::<String>().trim().to_string();
        result.push_row(vec![text, el.html()]);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Column;

    #[test]
    fn test_css_extract() {
        let html = r#"
        <html>
        <body>
            <div class="price">$19.99</div>
            <div class="price">$29.99</div>
            <a href="/product/123" class="link">Product</a>
        </body>
        </html>
        "#;

        let doc = Document::from_html(html);
        let result = extract_custom(&doc, "div.price").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows()[0].get(Column::Content), Some("$19.99"));
        assert_eq!(
            result.rows()[1].get(Column::Html),
            Some(r#"<div class="price">$29.99</div>"#)
        );
    }

    #[test]
    fn test_complex_selectors() {
        let html = r#"
        <div class="product">
            <span class="name">Product A</span>
            <span class="unit-price">€1.50/kg</span>
        </div>
        "#;

        let doc = Document::from_html(html);
        let result = extract_custom(&doc, "div.product .unit-price").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0].get(Column::Content), Some("€1.50/kg"));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let doc = Document::from_html("<div class='present'>x</div>");
        let result = extract_custom(&doc, "div.missing-class").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::from_html("<div>x</div>");
        for bad in ["div[class", "div >", "a[href", "div:not(.a", "div[class=\"a"] {
            match extract_custom(&doc, bad) {
                Err(ExtractError::InvalidSelector(msg)) => assert!(!msg.is_empty()),
                other => panic!("{bad}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_brackets_inside_strings() {
        let doc = Document::from_html(r#"<a title="[sale]">x</a><a title="other">y</a>"#);
        let result = extract_custom(&doc, r#"a[title="[sale]"]"#).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0].get(Column::Content), Some("x"));
    }

    #[test]
    fn test_empty_selector() {
        let doc = Document::from_html("<div>x</div>");
        assert_eq!(extract_custom(&doc, "  ").unwrap_err(), ExtractError::MissingSelector);
    }
}
