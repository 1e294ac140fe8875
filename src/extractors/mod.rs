//! HTML extraction modules
//!
//! Each module provides extraction for one mode. `extract` dispatches on the
//! mode and returns rows whose columns are fixed per mode.

mod css_extractor;
mod image_extractor;
mod link_extractor;
mod smart_extractor;
mod text_extractor;

pub use css_extractor::*;
pub use image_extractor::*;
pub use link_extractor::*;
pub use smart_extractor::*;
pub use text_extractor::*;

use std::fmt;

use log::debug;
use scraper::Selector;

use crate::document::Document;
use crate::error::{ExtractError, InputError};

/// Fieldless mode identifier, used by front ends and for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Text,
    Links,
    Images,
    CustomSelector,
    SmartExtract,
}

impl ModeKind {
    /// Columns produced by this mode, in export order
    pub fn columns(self) -> &'static [Column] {
        match self {
            ModeKind::Text => &[Column::Content],
            ModeKind::Links => &[Column::Content, Column::Href],
            ModeKind::Images => &[Column::Src, Column::Alt],
            ModeKind::CustomSelector => &[Column::Content, Column::Html],
            ModeKind::SmartExtract => &[Column::Type, Column::Content],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModeKind::Text => "Text Content",
            ModeKind::Links => "Links",
            ModeKind::Images => "Images",
            ModeKind::CustomSelector => "Custom Elements",
            ModeKind::SmartExtract => "Smart Extract",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extraction mode with its required parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Text,
    Links,
    Images,
    CustomSelector { selector: String },
    SmartExtract { description: String },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Text => ModeKind::Text,
            Mode::Links => ModeKind::Links,
            Mode::Images => ModeKind::Images,
            Mode::CustomSelector { .. } => ModeKind::CustomSelector,
            Mode::SmartExtract { .. } => ModeKind::SmartExtract,
        }
    }
}

/// A URL plus what to extract from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub url: String,
    pub mode: Mode,
}

impl ExtractionRequest {
    pub fn new(url: impl Into<String>, mode: Mode) -> Self {
        Self {
            url: url.into(),
            mode,
        }
    }

    /// Build a request from the loose form used by front ends.
    /// Only the parameter required by `kind` is checked; the other is ignored.
    pub fn from_parts(
        url: &str,
        kind: ModeKind,
        selector: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, InputError> {
        let mode = match kind {
            ModeKind::Text => Mode::Text,
            ModeKind::Links => Mode::Links,
            ModeKind::Images => Mode::Images,
            ModeKind::CustomSelector => Mode::CustomSelector {
                selector: required(selector, kind, "CSS selector")?,
            },
            ModeKind::SmartExtract => Mode::SmartExtract {
                description: required(description, kind, "description")?,
            },
        };
        Ok(Self::new(url, mode))
    }
}

fn required(
    value: Option<&str>,
    mode: ModeKind,
    parameter: &'static str,
) -> Result<String, InputError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(InputError::MissingParameter { mode, parameter }),
    }
}

/// Output column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Content,
    Href,
    Src,
    Alt,
    Html,
    Type,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Content => "Content",
            Column::Href => "Href",
            Column::Src => "Src",
            Column::Alt => "Alt",
            Column::Html => "Html",
            Column::Type => "Type",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row: column -> value, in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    cells: Vec<(Column, String)>,
}

impl ExtractedRow {
    pub fn get(&self, column: Column) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn cells(&self) -> &[(Column, String)] {
        &self.cells
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }
}

/// Non-fatal notice shown alongside (possibly empty) results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    NoPrices,
    NoEmails,
    NoMatchingRule,
    NoMatches { mode: ModeKind },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NoPrices => f.write_str("No price information found on the page"),
            Advisory::NoEmails => f.write_str("No email addresses found on the page"),
            Advisory::NoMatchingRule => f.write_str("No matching data found for your description"),
            Advisory::NoMatches { mode } => {
                write!(f, "No data found for the given criteria ({})", mode)
            }
        }
    }
}

/// Ordered rows sharing one column set, plus advisories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    columns: &'static [Column],
    rows: Vec<ExtractedRow>,
    advisories: Vec<Advisory>,
}

impl ExtractionResult {
    pub fn new(kind: ModeKind) -> Self {
        Self {
            columns: kind.columns(),
            rows: Vec::new(),
            advisories: Vec::new(),
        }
    }

    /// Append a row. `values` must line up with the mode's columns.
    pub fn push_row(&mut self, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.columns.len());
        let cells = self.columns.iter().copied().zip(values).collect();
        self.rows.push(ExtractedRow { cells });
    }

    pub fn push_advisory(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.as_str()).collect()
    }

    pub fn rows(&self) -> &[ExtractedRow] {
        &self.rows
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run one extraction mode over a parsed document
pub fn extract(doc: &Document, mode: &Mode) -> Result<ExtractionResult, ExtractError> {
    let kind = mode.kind();
    debug!("extracting {}", kind);

    let mut result = match mode {
        Mode::Text => extract_text(doc)?,
        Mode::Links => extract_links(doc)?,
        Mode::Images => extract_images(doc)?,
        Mode::CustomSelector { selector } => extract_custom(doc, selector)?,
        Mode::SmartExtract { description } => extract_smart(doc, description)?,
    };

    if result.is_empty() {
        result.push_advisory(Advisory::NoMatches { mode: kind });
    }
    for advisory in result.advisories() {
        debug!("advisory: {}", advisory);
    }
    debug!("{} produced {} rows", kind, result.len());

    Ok(result)
}

/// Compile a selector owned by an extraction rule.
/// A failure aborts the whole request, tagged with the rule name.
pub(crate) fn rule_selector(rule: &'static str, selector: &str) -> Result<Selector, ExtractError> {
    compile_selector(selector).map_err(|cause| ExtractError::Scan { rule, cause })
}

/// `Selector::parse` plus a check for unclosed brackets, parentheses and
/// strings, which the CSS parser silently closes at end of input.
pub(crate) fn compile_selector(selector: &str) -> Result<Selector, String> {
    check_balanced(selector)?;
    Selector::parse(selector).map_err(|e| e.to_string())
}

fn check_balanced(selector: &str) -> Result<(), String> {
    let mut open = Vec::new();
    let mut quote = None;
    let mut chars = selector.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' | '(' => open.push(c),
            ']' | ')' => {
                let opener = if c == ']' { '[' } else { '(' };
                if open.pop() != Some(opener) {
                    return Err(format!("unbalanced '{}' in selector", c));
                }
            }
            _ => {}
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} string in selector", q));
    }
    match open.pop() {
        Some(c) => Err(format!("unbalanced '{}' in selector", c)),
        None => Ok(()),
    }
}

/// Collapse runs of whitespace into single spaces and trim
pub(crate) fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
