//! Single-page HTTP fetch using ureq (simple blocking HTTP)
//!
//! One GET per call, no retries. Failures are classified into timeout, TLS,
//! connection and HTTP status errors.

use std::io;

use log::debug;
use ureq::http::header::CONTENT_TYPE;
use ureq::http::StatusCode;
use ureq::ResponseExt;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::validate::has_http_scheme;

/// A fetched page: raw body plus the final status
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after transport-level redirects
    pub url: String,
    pub status: u16,
    /// Raw `Content-Type` header, used to pick the body's charset
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Fetch `url` with the configured timeout and user agent.
///
/// Blocks the calling thread for up to `config.timeout`.
pub fn fetch(url: &str, config: &FetchConfig) -> Result<Page, FetchError> {
    if !has_http_scheme(url) {
        return Err(FetchError::InvalidScheme(url.to_string()));
    }

    let agent = ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .user_agent(config.user_agent.as_str())
            .http_status_as_error(false)
            .build(),
    );

    debug!("GET {} (timeout {:?})", url, config.timeout);
    let mut resp = agent.get(url).call().map_err(classify_transport)?;

    let status = resp.status().as_u16();
    let final_url = resp.get_uri().to_string();
    debug!("{} -> HTTP {}", final_url, status);

    classify_status(status)?;

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = resp
        .body_mut()
        .read_to_vec()
        .map_err(|e| FetchError::Body(e.to_string()))?;
    debug!("read {} bytes from {}", body.len(), final_url);

    Ok(Page {
        url: final_url,
        status,
        content_type,
        body,
    })
}

/// Map a final HTTP status to success or an `Http` error
pub fn classify_status(code: u16) -> Result<(), FetchError> {
    if (200..300).contains(&code) {
        return Ok(());
    }

    let reason = StatusCode::from_u16(code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
        .to_string();
    Err(FetchError::Http { code, reason })
}

fn classify_transport(err: ureq::Error) -> FetchError {
    match &err {
        ureq::Error::Timeout(_) => FetchError::Timeout,
        ureq::Error::Io(e) if e.kind() == io::ErrorKind::TimedOut => FetchError::Timeout,
        ureq::Error::Tls(msg) => FetchError::Tls(msg.to_string()),
        ureq::Error::Rustls(e) => FetchError::Tls(e.to_string()),
        _ => FetchError::Connection(err.to_string()),
    }
}
