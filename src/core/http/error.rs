//! Client error types and server message extraction

use serde::de::DeserializeOwned;

use super::transport::TransportError;

/// Message shown when the server gives no usable explanation
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Message shown when the session could not be refreshed
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Message shown when the browser refuses to keep the session
pub const STORAGE_ERROR_MESSAGE: &str = "Could not save your session. Check that site storage is enabled.";

/// API client error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Rejected(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Could not save the session: {0}")]
    Storage(String),
}

impl ApiError {
    /// Build the error for a non-2xx response
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Server { status, message }
        }
    }

    /// HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) | ApiError::Encode(_) | ApiError::Decode(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
            ApiError::Storage(_) => STORAGE_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Pull the `message` field out of a JSON error body
pub fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

/// Decode a `{success, message, ...}` envelope into `T`.
///
/// An explicit `"success": false` is a rejection carrying the server's message.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if value.get("success").and_then(|s| s.as_bool()) == Some(false) {
        return Err(ApiError::Rejected(extract_message(body)));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
