//! Anchor extraction

use super::{normalize_ws, rule_selector, ExtractionResult, ModeKind};
use crate::document::Document;
use crate::error::ExtractError;

/// Extract every `a[href]` as (text, href).
/// Relative hrefs are resolved when the document has a base URL.
pub fn extract_links(doc: &Document) -> Result<ExtractionResult, ExtractError> {
    let selector = rule_selector("link", "a[href]")?;
    let mut result = ExtractionResult::new(ModeKind::Links);

    for el in doc.html().select(&selector) {
        if let Some(href) = el.value().attr("href") {
            let text = normalize_ws(&el.text().collect::<String>());
            result.push_row(vec![text, doc.resolve(href)]);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Column;
    use url::Url;

    #[test]
    fn test_extract_links() {
        let html = r#"
        <html>
        <body>
            <a href="/page1">Page 1</a>
            <a href="https://other.com/page">External</a>
            <a name="anchor-only">No href</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="relative/path">Relative</a>
        </body>
        </html>
        "#;

        let base = Url::parse("https://example.com/dir/").unwrap();
        let doc = Document::parse(html.as_bytes(), None, Some(base)).unwrap();
        let result = extract_links(&doc).unwrap();

        let hrefs: Vec<&str> = result.rows().iter().filter_map(|r| r.get(Column::Href)).collect();
        assert_eq!(
            hrefs,
            vec![
                "https://example.com/page1",
                "https://other.com/page",
                "mailto:test@example.com",
                "https://example.com/dir/relative/path",
            ]
        );
        assert_eq!(result.rows()[0].get(Column::Content), Some("Page 1"));
    }

    #[test]
    fn test_links_without_base_stay_raw() {
        let doc = Document::from_html(r#"<a href="/x">  Multi
            line </a>"#);
        let result = extract_links(&doc).unwrap();
        assert_eq!(result.rows()[0].get(Column::Href), Some("/x"));
        assert_eq!(result.rows()[0].get(Column::Content), Some("Multi line"));
    }
}
