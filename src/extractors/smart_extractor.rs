//! Keyword-driven extraction of prices and email addresses
//!
//! The description is matched case-insensitively against fixed trigger words.
//! Rules run in declaration order (price, then email) and their rows are
//! concatenated. A failing rule aborts the whole call.

use log::debug;
use scraper::{ElementRef, Node};

use super::{rule_selector, Advisory, ExtractionResult, ModeKind};
use crate::document::Document;
use crate::error::ExtractError;

const CURRENCY_SYMBOLS: [char; 3] = ['$', '€', '£'];

/// One keyword-triggered rule
#[derive(Clone)]
struct SmartRule {
    name: &'static str,
    label: &'static str,
    triggered: fn(&str) -> bool,
    scan: fn(&Document) -> Result<Vec<String>, ExtractError>,
    none_found: Advisory,
}

const RULES: [SmartRule; 2] = [
    SmartRule {
        name: "price",
        label: "Price",
        triggered: wants_prices,
        scan: scan_prices,
        none_found: Advisory::NoPrices,
    },
    SmartRule {
        name: "email",
        label: "Email",
        triggered: wants_emails,
        scan: scan_emails,
        none_found: Advisory::NoEmails,
    },
];

/// Extract rows of {Type, Content} according to keywords in `description`
pub fn extract_smart(doc: &Document, description: &str) -> Result<ExtractionResult, ExtractError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ExtractError::MissingDescription);
    }

    run_rules(doc, &description.to_lowercase(), &RULES)
}

fn run_rules(
    doc: &Document,
    desc_lower: &str,
    rules: &[SmartRule],
) -> Result<ExtractionResult, ExtractError> {
    let mut result = ExtractionResult::new(ModeKind::SmartExtract);
    let mut fired = false;

    for rule in rules {
        if !(rule.triggered)(desc_lower) {
            continue;
        }
        fired = true;

        let found = (rule.scan)(doc)?;
        debug!("{} rule matched {} nodes", rule.name, found.len());
        if found.is_empty() {
            result.push_advisory(rule.none_found);
        }
        for content in found {
            result.push_row(vec![rule.label.to_string(), content]);
        }
    }

    if !fired {
        result.push_advisory(Advisory::NoMatchingRule);
    }

    Ok(result)
}

fn wants_prices(desc_lower: &str) -> bool {
    desc_lower.contains("price") || desc_lower.contains(CURRENCY_SYMBOLS)
}

fn wants_emails(desc_lower: &str) -> bool {
    desc_lower.contains("email")
}

/// span/div/p nodes whose sole string mentions a currency symbol
fn scan_prices(doc: &Document) -> Result<Vec<String>, ExtractError> {
    let selector = rule_selector("price", "span, div, p")?;

    Ok(doc
        .html()
        .select(&selector)
        .filter_map(sole_string)
        .filter(|text| text.contains(CURRENCY_SYMBOLS))
        .map(|text| text.trim().to_string())
        .collect())
}

/// mailto: targets of anchors, with the scheme removed
fn scan_emails(doc: &Document) -> Result<Vec<String>, ExtractError> {
    let selector = rule_selector("email", "a[href]")?;

    Ok(doc
        .html()
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| href.contains("mailto:"))
        .map(|href| href.replace("mailto:", ""))
        .collect())
}

/// Text of an element whose only child is a text node, following chains of
/// single-child elements (`<div><span>$5</span></div>` yields "$5").
fn sole_string(el: ElementRef<'_>) -> Option<&str> {
    let mut node = *el;
    loop {
        let mut children = node.children();
        let only = children.next()?;
        if children.next().is_some() {
            return None;
        }
        match only.value() {
            Node::Text(text) => return Some(&**text),
            Node::Element(_) => node = only,
            _ => return None,
        }
    }
}
