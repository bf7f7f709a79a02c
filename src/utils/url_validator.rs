//! Target URL validation.
//!
//! URLs are checked but never rewritten: the stored target is exactly what
//! the client sent, so a redirect returns the same string.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must not contain whitespace or control characters")]
    IllegalCharacters,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a URL submitted for shortening.
///
/// # Rules
///
/// 1. Must be non-empty
/// 2. No whitespace or control characters anywhere (the parser would silently
///    strip some of them, making the stored string differ from the parsed one)
/// 3. Must parse as an absolute URL
/// 4. Scheme must be `http` or `https`
/// 5. Must have a host
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] that applies.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_target_url("https://example.com/path?q=1").is_ok());
/// assert_eq!(validate_target_url("ftp://example.com"), Err(UrlValidationError::UnsupportedProtocol));
/// ```
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlValidationError::IllegalCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_target_url("http://example.com").is_ok());
        assert!(validate_target_url("https://example.com").is_ok());
        assert!(validate_target_url("HTTPS://EXAMPLE.COM/Path").is_ok());
    }

    #[test]
    fn test_accepts_query_port_and_fragment() {
        assert!(validate_target_url("https://example.com:8443/a/b?x=1&y=2#frag").is_ok());
    }

    #[test]
    fn test_accepts_ip_hosts() {
        assert!(validate_target_url("http://127.0.0.1:8080/").is_ok());
        assert!(validate_target_url("http://[::1]/").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_target_url(""), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_rejects_whitespace() {
        assert_eq!(
            validate_target_url(" https://example.com"),
            Err(UrlValidationError::IllegalCharacters)
        );
        assert_eq!(
            validate_target_url("https://example.com/a b"),
            Err(UrlValidationError::IllegalCharacters)
        );
        assert_eq!(
            validate_target_url("https://example.com/\nx"),
            Err(UrlValidationError::IllegalCharacters)
        );
    }

    #[test]
    fn test_rejects_relative_and_garbage() {
        assert!(matches!(
            validate_target_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_target_url("example.com/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_target_url("https://"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_other_schemes() {
        for input in [
            "ftp://example.com",
            "javascript:alert(1)",
            "data:text/plain,hello",
            "file:///etc/passwd",
            "mailto:user@example.com",
        ] {
            assert_eq!(
                validate_target_url(input),
                Err(UrlValidationError::UnsupportedProtocol),
                "{input}"
            );
        }
    }
}
