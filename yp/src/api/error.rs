//! API error types

use thiserror::Error;

/// Errors that can occur talking to the account store API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success envelope code
    #[error("Server returned {code}: {message}")]
    Server { code: i64, message: String },

    /// The server answered 200 but the payload was not usable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Server-supplied message, if this error carries one.
    ///
    /// Used by registration, which surfaces the server text verbatim.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let err = ApiError::Server {
            code: 400,
            message: "Username already taken".to_string(),
        };
        assert_eq!(err.server_message(), Some("Username already taken"));

        let err = ApiError::InvalidResponse("bad json".to_string());
        assert_eq!(err.server_message(), None);
    }
}
