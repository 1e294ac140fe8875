//! URL validation
//!
//! Pure predicates used before any network call is attempted.

use url::Url;

use crate::error::InputError;

/// True if the URL is non-empty after trimming
pub fn is_present(url: &str) -> bool {
    !url.trim().is_empty()
}

/// True if the URL literally starts with `http://` or `https://`
pub fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// True for well-formed absolute http(s) URLs with a host
pub fn is_valid_url(url: &str) -> bool {
    if !has_http_scheme(url) {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Run both checks in order: presence first, then structure
pub fn check_url(url: &str) -> Result<Url, InputError> {
    if !is_present(url) {
        return Err(InputError::EmptyUrl);
    }
    let trimmed = url.trim();
    if !is_valid_url(trimmed) {
        return Err(InputError::InvalidUrl(trimmed.to_string()));
    }
    Url::parse(trimmed).map_err(|_| InputError::InvalidUrl(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_required() {
        for url in ["example.com", "ftp://example.com", "//example.com", "mailto:a@b.com", "HTTP://example.com"] {
            assert!(!is_valid_url(url), "{url} should be rejected");
        }
    }

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com:8080/a/b?c=d#frag"));
        assert!(is_valid_url("https://127.0.0.1/"));
    }

    #[test]
    fn test_malformed_urls() {
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("https://exa mple.com"));
        assert!(!is_valid_url("http://[::1"));
    }

    #[test]
    fn test_check_url_order() {
        assert_eq!(check_url(""), Err(InputError::EmptyUrl));
        assert_eq!(check_url("   "), Err(InputError::EmptyUrl));
        assert_eq!(
            check_url("not a url"),
            Err(InputError::InvalidUrl("not a url".to_string()))
        );
        let url = check_url(" https://example.com/page ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }
}
