//! Transport error taxonomy shared by the API client and reducers.
//!
//! # Design
//! - Keep display messages constant; carry server context in fields.
//! - Derive user-facing copy from the server payload only at the edge.

use eventora_api_models::ApiMessage;
use serde_json::Value;
use thiserror::Error;

/// Result alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced by the HTTP layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, abort).
    #[error("api transport failure")]
    Transport {
        /// Transport-provided description.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("api returned an error status")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },
    /// The response body could not be decoded into the expected shape.
    #[error("api response decode failure")]
    Decode {
        /// Decoder description.
        message: String,
    },
}

impl ApiError {
    /// Build a transport error from any displayable source.
    #[must_use]
    pub fn transport(source: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: source.to_string(),
        }
    }

    /// Build a decode error from any displayable source.
    #[must_use]
    pub fn decode(source: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: source.to_string(),
        }
    }

    /// HTTP status when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Message to show the user.
    ///
    /// Prefers a structured `{ "message": .. }` body, then a JSON string body,
    /// then any other JSON serialized compactly, then raw text, then the
    /// transport/decoder description, and finally `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let detail = match self {
            Self::Status { body, .. } => message_from_body(body),
            Self::Transport { message } | Self::Decode { message } => {
                non_empty(message).map(str::to_string)
            }
        };
        detail.unwrap_or_else(|| fallback.to_string())
    }
}

fn message_from_body(body: &str) -> Option<String> {
    let trimmed = non_empty(body)?;
    if let Ok(ApiMessage { message }) = serde_json::from_str::<ApiMessage>(trimmed) {
        return non_empty(&message).map(str::to_string);
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(text)) => non_empty(&text).map(str::to_string),
        Ok(Value::Null) => None,
        Ok(other) => Some(other.to_string()),
        Err(_) => Some(trimmed.to_string()),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
