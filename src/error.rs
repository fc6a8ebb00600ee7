//! Error types for gh-release-tools
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for gh-release-tools
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Failed to fetch page {page}: {source}")]
    PageFetch {
        page: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Wrap a failure of the page-fetch callback for `page`.
    ///
    /// An error that already names its page is passed through untouched.
    pub fn page_fetch(page: u32, source: Error) -> Self {
        match source {
            Self::PageFetch { .. } => source,
            other => Self::PageFetch {
                page,
                source: Box::new(other),
            },
        }
    }

    /// Page number attached to a page fetch failure, if any
    pub fn failed_page(&self) -> Option<u32> {
        match self {
            Self::PageFetch { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Check if this is a 404 from the API
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::HttpStatus { status, .. } => *status == 404,
            Self::PageFetch { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Result type alias for gh-release-tools
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("owner");
        assert_eq!(err.to_string(), "Missing required config field: owner");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_page_fetch_display() {
        let err = Error::page_fetch(3, Error::http_status(502, "Bad Gateway"));
        assert_eq!(err.to_string(), "Failed to fetch page 3: HTTP 502: Bad Gateway");
        assert_eq!(err.failed_page(), Some(3));
    }

    #[test]
    fn test_page_fetch_does_not_double_wrap() {
        let inner = Error::page_fetch(2, Error::decode("bad body"));
        let outer = Error::page_fetch(7, inner);
        assert_eq!(outer.failed_page(), Some(2));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::http_status(404, "").is_not_found());
        assert!(Error::page_fetch(1, Error::http_status(404, "")).is_not_found());
        assert!(!Error::http_status(500, "").is_not_found());
        assert!(!Error::config("x").is_not_found());
    }
}
