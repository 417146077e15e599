//! Classify HTTP status and curl errors into retry policy error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error for retry decisions.
///
/// Every curl failure is a transport failure and worth another attempt;
/// only the timeout case is told apart for logging.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    ErrorKind::Connection
}

pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => classify_http_status(*code),
        FetchError::Decode(_) => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_429_and_503_throttled() {
        assert_eq!(classify_http_status(429), ErrorKind::Throttled);
        assert_eq!(classify_http_status(503), ErrorKind::Throttled);
    }

    #[test]
    fn http_5xx_retryable() {
        assert!(matches!(classify_http_status(500), ErrorKind::Http5xx(500)));
        assert!(matches!(classify_http_status(502), ErrorKind::Http5xx(502)));
    }

    #[test]
    fn missing_page_is_not_retried() {
        assert_eq!(classify_http_status(404), ErrorKind::Other);
        assert_eq!(classify_http_status(403), ErrorKind::Other);
    }

    #[test]
    fn every_curl_error_is_retryable() {
        // weird reply, HTTP/2 framing, too many redirects, peer verification
        for code in [8, 16, 47, 60, 7] {
            let err = curl::Error::new(code);
            assert_eq!(classify(&FetchError::Curl(err)), ErrorKind::Connection, "code {}", code);
        }
        assert_eq!(classify_curl_error(&curl::Error::new(28)), ErrorKind::Timeout);
    }

    #[test]
    fn decode_error_is_not_retried() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(classify(&FetchError::Decode(err)), ErrorKind::Other);
    }
}
