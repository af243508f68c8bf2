//! # Recipe API Error Types Module
//!
//! Failures of a single lookup against the recipe service. An empty result is not
//! an error: the client returns `Ok` with no records for that case.

/// Custom error types for recipe API operations
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request did not complete within the configured timeout
    Timeout(String),
    /// Connection, DNS or other transport failure
    Transport(String),
    /// The service answered with a non-success HTTP status
    Status(u16),
    /// The response body was not the JSON shape we expect
    Decode(String),
    /// The endpoint template could not be turned into a valid URL
    InvalidUrl(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Timeout(msg) => write!(f, "Timeout error: {msg}"),
            ApiError::Transport(msg) => write!(f, "Transport error: {msg}"),
            ApiError::Status(code) => write!(f, "Unexpected HTTP status: {code}"),
            ApiError::Decode(msg) => write!(f, "Decode error: {msg}"),
            ApiError::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ApiError::Timeout("10s elapsed".to_string()).to_string(),
            "Timeout error: 10s elapsed"
        );
        assert_eq!(ApiError::Status(503).to_string(), "Unexpected HTTP status: 503");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Decode(_)));
    }
}
