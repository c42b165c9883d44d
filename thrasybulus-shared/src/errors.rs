use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Heading shown when the backend could not be reached at all.
pub const NETWORK_ERROR_HEAD: &str = "Network Error";
/// Body shown when the backend could not be reached at all.
pub const NETWORK_ERROR_BODY: &str = "Failed to reach server.";
/// Heading shown for 4xx responses.
pub const BAD_REQUEST_HEAD: &str = "Bad Request";
/// Heading shown for every other failure.
pub const UNKNOWN_ERROR_HEAD: &str = "Unknown Error";
/// Body shown for every other failure.
pub const UNKNOWN_ERROR_BODY: &str = "An unknown error occurred.";

/// Failures talking to the backend service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Backend unreachable: {message}")]
    Unreachable { message: String },

    #[error("Bad request ({status}): {message}")]
    BadRequest {
        status: u16,
        message: String,
        payload: Option<String>,
    },

    #[error("HTTP error ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        payload: Option<String>,
    },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl ApiError {
    /// Response body carried by the failure, if the server sent one.
    pub fn payload(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { payload, .. } | ApiError::Http { payload, .. } => payload
                .as_deref()
                .map(str::trim)
                .filter(|body| !body.is_empty()),
            _ => None,
        }
    }

    /// Classifies the failure into a user-facing `{head, body}` record.
    ///
    /// Unreachable backends get a fixed message, 4xx responses surface their
    /// message text and everything else is reported as unknown. A response
    /// payload is appended to the body.
    pub fn to_error_state(&self) -> ErrorState {
        let (head, body) = match self {
            ApiError::Unreachable { .. } => (NETWORK_ERROR_HEAD, NETWORK_ERROR_BODY.to_string()),
            ApiError::BadRequest { message, .. } => (BAD_REQUEST_HEAD, message.clone()),
            _ => (UNKNOWN_ERROR_HEAD, UNKNOWN_ERROR_BODY.to_string()),
        };

        let body = match self.payload() {
            Some(payload) => format!("{body}\n{payload}"),
            None => body,
        };

        ErrorState::new(head, body)
    }
}

/// Most recent unrecovered failure, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    pub head: String,
    pub body: String,
}

impl ErrorState {
    pub fn new(head: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            body: body.into(),
        }
    }
}

impl From<&ApiError> for ErrorState {
    fn from(err: &ApiError) -> Self {
        err.to_error_state()
    }
}

/// Frontend configuration and startup errors
#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("Invalid backend host: '{host}'")]
    InvalidHost { host: String },

    #[error("Invalid backend port: {port}")]
    InvalidPort { port: u16 },

    #[error("Failed to read settings file {path}: {source}")]
    SettingsRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {message}")]
    SettingsParse { path: String, message: String },

    #[error("Failed to build HTTP client: {message}")]
    ClientBuild { message: String },
}

/// Result type aliases for convenience
pub type ApiResult<T> = Result<T, ApiError>;
pub type FrontendResult<T> = Result<T, FrontendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_classification() {
        let err = ApiError::Unreachable {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_error_state(),
            ErrorState::new("Network Error", "Failed to reach server.")
        );
    }

    #[test]
    fn test_bad_request_includes_message_and_payload() {
        let err = ApiError::BadRequest {
            status: 400,
            message: "Request failed with status code 400".to_string(),
            payload: Some("missing field `interface`".to_string()),
        };
        let state = err.to_error_state();
        assert_eq!(state.head, BAD_REQUEST_HEAD);
        assert!(state.body.starts_with("Request failed with status code 400"));
        assert!(state.body.ends_with("missing field `interface`"));
    }

    #[test]
    fn test_other_errors_are_unknown() {
        let err = ApiError::Decode {
            message: "expected value at line 1".to_string(),
        };
        assert_eq!(
            err.to_error_state(),
            ErrorState::new(UNKNOWN_ERROR_HEAD, UNKNOWN_ERROR_BODY)
        );

        let err = ApiError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
            payload: Some("panicked".to_string()),
        };
        let state = err.to_error_state();
        assert_eq!(state.head, UNKNOWN_ERROR_HEAD);
        assert_eq!(state.body, format!("{UNKNOWN_ERROR_BODY}\npanicked"));
    }

    #[test]
    fn test_blank_payload_not_appended() {
        let err = ApiError::Http {
            status: 502,
            message: "Bad Gateway".to_string(),
            payload: Some("  ".to_string()),
        };
        assert_eq!(err.payload(), None);
        assert_eq!(err.to_error_state().body, UNKNOWN_ERROR_BODY);
    }
}
