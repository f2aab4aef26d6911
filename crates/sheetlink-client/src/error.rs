//! Error types for backend API calls.

use thiserror::Error;

/// Errors that can occur while talking to the SheetLink backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Network request failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The request hit the client-side timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend no longer recognizes the session cookie.
    #[error("session expired")]
    SessionExpired,

    /// The backend answered with a failure status or a failure envelope.
    #[error("backend error ({status}): {message}")]
    Backend {
        /// HTTP status code of the response.
        status: u16,
        /// Explanation from the response body, or the status line.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns a message suitable for display, keeping the backend's own
    /// wording where it provided any.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => {
                "Could not reach SheetLink. Please check your internet connection."
            }
            Self::Timeout => "The server took too long to respond. Please try again.",
            Self::SessionExpired => "Your session has expired. Please sign in again.",
            Self::Backend { message, .. } => message,
            Self::Decode(_) => "The server sent an unexpected response.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Backend { status, .. } => *status >= 500,
            Self::SessionExpired | Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(err.user_message().contains("internet connection"));

        let err = ApiError::Backend {
            status: 409,
            message: "Sheet is no longer accessible".to_string(),
        };
        assert_eq!(err.user_message(), "Sheet is no longer accessible");

        assert!(
            ApiError::SessionExpired
                .user_message()
                .contains("sign in again")
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::Network("reset".to_string()).is_retryable());
        assert!(
            ApiError::Backend {
                status: 503,
                message: "maintenance".to_string()
            }
            .is_retryable()
        );
        assert!(
            !ApiError::Backend {
                status: 400,
                message: "bad request".to_string()
            }
            .is_retryable()
        );
        assert!(!ApiError::SessionExpired.is_retryable());
    }
}
