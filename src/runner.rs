//! Request orchestration: validate, fetch, parse, extract
//!
//! Stages run sequentially on the calling thread. The first failure ends the
//! request; nothing is retained between requests.

use log::{debug, info};

use crate::config::FetchConfig;
use crate::document::Document;
use crate::error::ScrapeError;
use crate::extractors::{extract, ExtractionRequest, ExtractionResult, ModeKind};
use crate::fetch::fetch;
use crate::validate::check_url;

/// Run one extraction from the loose front-end parameters with default settings
pub fn run_extraction(
    url: &str,
    mode: ModeKind,
    selector: Option<&str>,
    description: Option<&str>,
) -> Result<ExtractionResult, ScrapeError> {
    let request = ExtractionRequest::from_parts(url, mode, selector, description);
    // URL problems are reported before mode parameter problems
    check_url(url)?;
    run(&request?, &FetchConfig::default())
}

/// Run one fully-formed request
pub fn run(request: &ExtractionRequest, config: &FetchConfig) -> Result<ExtractionResult, ScrapeError> {
    let url = check_url(&request.url)?;
    let kind = request.mode.kind();
    info!("scraping {} ({})", url, kind);

    let page = fetch(url.as_str(), config)?;
    debug!("fetched {} bytes, HTTP {}", page.body.len(), page.status);

    let base = url::Url::parse(&page.url).ok().or(Some(url));
    let doc = Document::parse(&page.body, page.content_type.as_deref(), base)?;

    let result = extract(&doc, &request.mode)?;
    info!("{} extracted {} rows", kind, result.len());
    Ok(result)
}
