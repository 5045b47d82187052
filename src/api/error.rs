//! Error types for backend API calls.

use thiserror::Error;

/// Errors that can occur while talking to the watchlist backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request could not be sent or the connection dropped
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured deadline
    #[error("Request timeout")]
    Timeout,

    /// Backend answered with a non-2xx status
    #[error("Backend error {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// Server-provided detail, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }

    /// Text to show the user: the server detail when present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ApiError::Http {
            status: 409,
            detail: Some("already watching".to_string()),
        };
        assert_eq!(err.to_string(), "Backend error 409: already watching");

        let err = ApiError::Http {
            status: 500,
            detail: None,
        };
        assert_eq!(err.to_string(), "Backend error 500: no detail");
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::Http {
            status: 404,
            detail: Some("stock not found".to_string()),
        };
        assert_eq!(err.user_message("generic"), "stock not found");
        assert_eq!(
            ApiError::Network("refused".to_string()).user_message("generic"),
            "generic"
        );
    }
}
