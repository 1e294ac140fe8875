//! Lenient HTML parsing
//!
//! Wraps `scraper::Html` together with the page URL used to resolve relative
//! references. Broken markup is repaired by the parser; only binary input fails.
//!
//! Bodies are decoded with the first encoding found in: the byte order mark,
//! the `Content-Type` charset, a `<meta>` charset declaration, UTF-8.

use encoding_rs::{Encoding, UTF_8};
use log::debug;
use scraper::Html;
use url::Url;

use crate::error::ParseError;

/// How many leading bytes are sniffed for binary content and `<meta>` charsets
const SNIFF_LEN: usize = 1024;

/// A parsed page, owned by a single extraction request
pub struct Document {
    html: Html,
    base: Option<Url>,
}

impl Document {
    /// Parse raw response bytes, decoding them per the detected charset.
    /// Malformed byte sequences are replaced, not rejected.
    pub fn parse(
        bytes: &[u8],
        content_type: Option<&str>,
        base: Option<Url>,
    ) -> Result<Self, ParseError> {
        let text = decode(bytes, content_type)?;
        let html = Html::parse_document(&text);
        if !html.errors.is_empty() {
            debug!("recovered from {} HTML parse errors", html.errors.len());
        }

        Ok(Self { html, base })
    }

    /// Parse an HTML string with no base URL
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            base: None,
        }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Resolve a (possibly relative) reference against the base URL.
    /// Falls back to the raw reference when there is no base or joining fails.
    pub fn resolve(&self, reference: &str) -> String {
        let reference = reference.trim();
        match &self.base {
            Some(base) => base
                .join(reference)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| reference.to_string()),
            None => reference.to_string(),
        }
    }
}

fn decode(bytes: &[u8], content_type: Option<&str>) -> Result<String, ParseError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        debug!("decoding body as {} (byte order mark)", encoding.name());
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return Ok(text.into_owned());
    }

    let encoding = content_type
        .and_then(header_charset)
        .or_else(|| meta_charset(bytes))
        .unwrap_or(UTF_8);

    // NUL bytes only mean binary for ASCII-compatible encodings
    if encoding.is_ascii_compatible() && looks_binary(bytes) {
        return Err(ParseError::Binary);
    }

    debug!("decoding body as {}", encoding.name());
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        debug!("replaced malformed {} sequences", encoding.name());
    }
    Ok(text.into_owned())
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    let content_type = content_type.to_ascii_lowercase();
    charset_label(&content_type).and_then(|label| Encoding::for_label(label.as_bytes()))
}

/// Charset declared by a `<meta charset>` or `<meta http-equiv>` tag near the top
fn meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    head.split("<meta").skip(1).find_map(|tag| {
        let tag = tag.split('>').next().unwrap_or_default();
        let label = charset_label(tag)?;
        // meta-declared UTF-16 is read as UTF-8
        Encoding::for_label(label.as_bytes()).map(Encoding::output_encoding)
    })
}

/// Value of a `charset=` parameter in lowercased header or tag text
fn charset_label(s: &str) -> Option<&str> {
    let start = s.find("charset=")? + "charset=".len();
    let rest = s[start..].trim_start_matches(['"', '\'', ' ']);
    let end = rest
        .find(|c: char| matches!(c, '"' | '\'' | ';' | '/' | '>') || c.is_whitespace())
        .unwrap_or(rest.len());
    let label = &rest[..end];
    (!label.is_empty()).then_some(label)
}

fn looks_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(SNIFF_LEN).any(|&b| b == 0)
}
