//! Error taxonomy
//!
//! One error enum per stage (input, fetch, parse, extract, export), wrapped by
//! `ScrapeError` at the invocation surface. Every error ends the current request.

use thiserror::Error;

use crate::extractors::ModeKind;

/// Problems with user input, detected before any network call
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("Invalid URL format: '{0}'. Please enter a valid URL (e.g., https://example.com)")]
    InvalidUrl(String),

    #[error("The {mode} mode requires a {parameter}")]
    MissingParameter {
        mode: ModeKind,
        parameter: &'static str,
    },
}

/// Failures while retrieving the page
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("URL must start with http:// or https:// (got '{0}')")]
    InvalidScheme(String),

    #[error("Request timed out. The website took too long to respond.")]
    Timeout,

    #[error("SSL Certificate verification failed. The website might not be secure. ({0})")]
    Tls(String),

    #[error("Failed to connect to the website. Please check your internet connection. ({0})")]
    Connection(String),

    #[error("{}", http_message(.code, .reason))]
    Http { code: u16, reason: String },

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    /// HTTP status code, if this is an HTTP error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Http { code, .. } => Some(*code),
            _ => None,
        }
    }
}

fn http_message(code: &u16, reason: &str) -> String {
    match *code {
        403 => "Access forbidden. The website might be blocking web scrapers.".to_string(),
        404 => "Page not found. Please check if the URL is correct.".to_string(),
        _ if reason.is_empty() => format!("HTTP error occurred: {code}"),
        _ => format!("HTTP error occurred: {code} {reason}"),
    }
}

/// Catastrophic parse failures. Malformed markup is never an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed to parse HTML content: response body looks like binary data")]
    Binary,
}

/// Failures inside the extraction engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    #[error("A CSS selector is required for custom element extraction")]
    MissingSelector,

    #[error("Description is required for Smart Extract")]
    MissingDescription,

    #[error("Error during {rule} extraction: {cause}")]
    Scan { rule: &'static str, cause: String },
}

/// Failures while writing or reading the CSV export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of a single extraction request
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl ScrapeError {
    /// Input problems are shown as warnings rather than hard errors
    pub fn is_input(&self) -> bool {
        matches!(self, ScrapeError::Input(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_messages() {
        let forbidden = FetchError::Http { code: 403, reason: "Forbidden".into() };
        assert!(forbidden.to_string().contains("forbidden"));

        let missing = FetchError::Http { code: 404, reason: "Not Found".into() };
        assert!(missing.to_string().contains("Page not found"));

        let other = FetchError::Http { code: 500, reason: "Internal Server Error".into() };
        assert_eq!(other.to_string(), "HTTP error occurred: 500 Internal Server Error");
        assert_eq!(other.status_code(), Some(500));
    }

    #[test]
    fn test_transparent_wrapping() {
        let err: ScrapeError = ExtractError::MissingDescription.into();
        assert_eq!(err.to_string(), "Description is required for Smart Extract");
        assert!(!err.is_input());
        assert!(ScrapeError::from(InputError::EmptyUrl).is_input());
    }
}
