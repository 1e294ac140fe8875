//! Image extraction

use super::{rule_selector, ExtractionResult, ModeKind};
use crate::document::Document;
use crate::error::ExtractError;

/// Extract every `img[src]` as (src, alt). A missing alt becomes "".
pub fn extract_images(doc: &Document) -> Result<ExtractionResult, ExtractError> {
    let selector = rule_selector("image", "img[src]")?;
    let mut result = ExtractionResult::new(ModeKind::Images);

    for el in doc.html().select(&selector) {
        if let Some(src) = el.value().attr("src") {
            let alt = el.value().attr("alt").unwrap_or("").trim().to_string();
            result.push_row(vec![doc.resolve(src), alt]);
        }
    }

    Ok(result)
}
