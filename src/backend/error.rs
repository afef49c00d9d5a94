//! Error types for the quiz backend integration

use thiserror::Error;

/// Errors from talking to the quiz backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Backend returned a non-2xx response
    ///
    /// `message` carries the backend's own `error` field verbatim when it
    /// sent one, or a generic fallback otherwise.
    #[error("{message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message surfaced to the user
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl BackendError {
    /// Message suitable for the status line
    pub fn user_message(&self) -> String {
        match self {
            BackendError::ApiError { message, .. } => message.clone(),
            other => format!("{other}. Please check the backend server."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_is_verbatim() {
        let err = BackendError::ApiError { status: 500, message: "model overloaded".into() };
        assert_eq!(err.user_message(), "model overloaded");
        assert_eq!(err.to_string(), "model overloaded");
    }
}
