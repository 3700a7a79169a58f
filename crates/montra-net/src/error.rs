//! Error types for fragment loading.

use std::fmt;

/// Fragment fetch errors.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// HTTP request failed.
    Request(String),
    /// Invalid URL provided.
    InvalidUrl(String),
    /// Request timed out.
    Timeout,
    /// Connection refused or failed.
    Connection(String),
    /// HTTP error status (anything outside 2xx).
    HttpStatus {
        /// The HTTP status code.
        status: u16,
    },
    /// Invalid header name or value.
    InvalidHeader(String),
    /// Invalid response body.
    InvalidBody(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(msg) => write!(f, "HTTP request error: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Connection(msg) => write!(f, "Connection error: {msg}"),
            Self::HttpStatus { status } => write!(f, "HTTP {status}"),
            Self::InvalidHeader(msg) => write!(f, "Invalid header: {msg}"),
            Self::InvalidBody(msg) => write!(f, "Invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::InvalidBody(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// A specialized Result type for fragment loading.
pub type Result<T> = std::result::Result<T, FetchError>;
