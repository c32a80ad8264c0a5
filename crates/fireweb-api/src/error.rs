//! Error types for fireweb-api

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Stable codes for client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    Transport,
    Timeout,
    HttpStatus,
    Encode,
    Decode,
    InvalidBaseUrl,
    Client,
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorCode::Transport => write!(f, "TRANSPORT"),
            ApiErrorCode::Timeout => write!(f, "TIMEOUT"),
            ApiErrorCode::HttpStatus => write!(f, "HTTP_STATUS"),
            ApiErrorCode::Encode => write!(f, "ENCODE"),
            ApiErrorCode::Decode => write!(f, "DECODE"),
            ApiErrorCode::InvalidBaseUrl => write!(f, "INVALID_BASE_URL"),
            ApiErrorCode::Client => write!(f, "CLIENT"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection could not be made or broke mid-request
    #[error("Transport error on {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {endpoint} timed out after {after:?}")]
    Timeout { endpoint: String, after: Duration },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {endpoint}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode response payload: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub fn code(&self) -> ApiErrorCode {
        match self {
            ApiError::Transport { .. } => ApiErrorCode::Transport,
            ApiError::Timeout { .. } => ApiErrorCode::Timeout,
            ApiError::Status { .. } => ApiErrorCode::HttpStatus,
            ApiError::Encode(_) => ApiErrorCode::Encode,
            ApiError::Decode(_) => ApiErrorCode::Decode,
            ApiError::InvalidBaseUrl { .. } => ApiErrorCode::InvalidBaseUrl,
            ApiError::Client(_) => ApiErrorCode::Client,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error() {
        let error = ApiError::Timeout {
            endpoint: "/api/parse".to_string(),
            after: Duration::from_secs(100),
        };
        assert!(error.is_timeout());
        assert_eq!(error.code(), ApiErrorCode::Timeout);
        assert_eq!(error.status(), None);
        assert_eq!(error.to_string(), "Request to /api/parse timed out after 100s");
    }

    #[test]
    fn test_subsecond_timeout_message() {
        let error = ApiError::Timeout {
            endpoint: "/api/accounts".to_string(),
            after: Duration::from_millis(200),
        };
        assert_eq!(error.to_string(), "Request to /api/accounts timed out after 200ms");
    }

    #[test]
    fn test_status_error() {
        let error = ApiError::Status {
            endpoint: "/api/accounts".to_string(),
            status: 500,
            body: "{\"detail\":\"boom\"}".to_string(),
        };
        assert!(!error.is_timeout());
        assert_eq!(error.status(), Some(500));
        assert_eq!(error.code().to_string(), "HTTP_STATUS");
    }
}
