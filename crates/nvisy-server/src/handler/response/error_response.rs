use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// HTTP error response representation.
///
/// Contains everything needed to serialize an error response: the error
/// name, a client-safe message, optional context and the status code.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// User-friendly error message safe for client display
    pub message: Cow<'a, str>,
    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "The service is temporarily unavailable. Please try again later",
        StatusCode::SERVICE_UNAVAILABLE,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            context: None,
            status,
        }
    }

    /// Appends a custom message to the existing one.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        let new_message = message.into();
        self.message = Cow::Owned(format!("{}. {}", self.message, new_message));
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_merging_message() {
        let response = ErrorResponse::SERVICE_UNAVAILABLE
            .with_message("Cache service temporarily unavailable")
            .with_message("Retry later");

        assert_eq!(
            &response.message,
            "The service is temporarily unavailable. Please try again later. Cache service temporarily unavailable. Retry later"
        );
    }

    #[test]
    fn error_response_merging_context() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("Pool construction failed")
            .with_context("No transport configured");

        assert_eq!(
            response.context.as_deref(),
            Some("Pool construction failed; No transport configured")
        );
    }

    #[test]
    fn error_response_serialization() {
        let response = ErrorResponse::SERVICE_UNAVAILABLE.with_context("Test context");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["name"], "service_unavailable");
        assert_eq!(json["context"], "Test context");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn error_response_without_context() {
        let json = serde_json::to_value(ErrorResponse::default()).unwrap();
        assert_eq!(json["name"], "internal_server_error");
        assert!(json.get("context").is_none());
    }
}
