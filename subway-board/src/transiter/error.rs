//! Transiter client error types.

use std::time::Duration;

/// Errors from a single upstream call.
///
/// None of these are fatal to a board request: callers substitute an empty
/// or sentinel value for the one field the call was feeding.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, client timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The requested route or stop does not exist upstream
    #[error("not found upstream: {0}")]
    NotFound(String),

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The call did not complete within its deadline
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Simulated failure from the mock client
    #[error("mock failure: {0}")]
    Mock(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = UpstreamError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = UpstreamError::NotFound("stops/Z99".into());
        assert_eq!(err.to_string(), "not found upstream: stops/Z99");

        let err = UpstreamError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "timed out after 1.5s");

        let err = UpstreamError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected value"));
    }
}
