//! Application error type with HTTP response conversion.
//!
//! Every fallible operation in the API returns [`AppError`]. An error carries
//! the HTTP status it maps to, the underlying [`anyhow::Error`], and a short
//! `context` string naming the field or resource involved. It renders as:
//!
//! ```json
//! { "error": "First name is required", "context": "first_name" }
//! ```
//!
//! Server errors (5xx) are logged with their full chain and answered with a
//! generic message so persistence details never reach the client.
//!
//! Any error convertible into [`anyhow::Error`] converts into an internal
//! `AppError`, so `?` on a `sqlx` or `bcrypt` result yields a 500.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The error kinds surfaced by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    BadRequest,
    Conflict,
    NotFound,
    Unauthorized,
    Forbidden,
    Internal,
}

impl ErrorKind {
    fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNPROCESSABLE_ENTITY => Self::Validation,
            StatusCode::BAD_REQUEST => Self::BadRequest,
            StatusCode::CONFLICT => Self::Conflict,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden,
            _ => Self::Internal,
        }
    }

    fn default_context(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::BadRequest => "bad_request",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Internal => "internal",
        }
    }
}

/// The JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Contact not found")]
    pub error: String,
    #[schema(example = "contact")]
    pub context: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub context: String,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            context: ErrorKind::from_status(status).default_context().to_string(),
        }
    }

    /// Replaces the context reported alongside the message.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_status(self.status)
    }

    /// A field-level validation failure. The field name becomes the context.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, anyhow::anyhow!(message.into()))
            .with_context(field)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }

    /// The message sent to the client.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status.as_u16(),
                context = %self.context,
                error = ?self.error,
                "Request failed with server error"
            );
        }

        let body = Json(ErrorResponse {
            error: self.public_message(),
            context: self.context,
        });

        (self.status, body).into_response()
    }
}

/// Renders `context: message` with the full cause chain, for logs and the
/// console. Responses go through [`IntoResponse`] instead.
impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:#}", self.context, self.error)
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_constructors_map_to_status_and_kind() {
        let cases = vec![
            (AppError::validation("first_name", "required"), StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::Validation),
            (AppError::bad_request(anyhow::anyhow!("bad")), StatusCode::BAD_REQUEST, ErrorKind::BadRequest),
            (AppError::conflict(anyhow::anyhow!("dup")), StatusCode::CONFLICT, ErrorKind::Conflict),
            (AppError::not_found(anyhow::anyhow!("gone")), StatusCode::NOT_FOUND, ErrorKind::NotFound),
            (AppError::unauthorized("no token"), StatusCode::UNAUTHORIZED, ErrorKind::Unauthorized),
            (AppError::forbidden("nope"), StatusCode::FORBIDDEN, ErrorKind::Forbidden),
            (AppError::internal_error("boom"), StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Internal),
        ];

        for (err, status, kind) in cases {
            assert_eq!(err.status, status);
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn test_validation_uses_field_as_context() {
        let err = AppError::validation("last_name", "Last name is required");
        assert_eq!(err.context, "last_name");
        assert_eq!(err.error.to_string(), "Last name is required");
    }

    #[test]
    fn test_default_context_follows_kind() {
        assert_eq!(AppError::forbidden("x").context, "forbidden");
        assert_eq!(AppError::not_found(anyhow::anyhow!("x")).context, "not_found");
    }

    #[test]
    fn test_with_context_overrides_default() {
        let err = AppError::not_found(anyhow::anyhow!("Contact not found")).with_context("contact");
        assert_eq!(err.context, "contact");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_foreign_error_converts_to_internal() {
        let io = std::io::Error::other("disk on fire");
        let err: AppError = io.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_includes_context_and_cause_chain() {
        let err = AppError::internal(anyhow::anyhow!("connection refused").context("Failed to begin transaction"));
        assert_eq!(
            err.to_string(),
            "internal: Failed to begin transaction: connection refused"
        );

        let err = AppError::validation("email", "Email is invalid");
        assert_eq!(format!("{err}"), "email: Email is invalid");
    }

    #[tokio::test]
    async fn test_response_body_has_error_and_context() {
        let (status, body) =
            body_json(AppError::validation("first_name", "First name is required")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "First name is required");
        assert_eq!(body["context"], "first_name");
    }

    #[tokio::test]
    async fn test_internal_error_message_is_hidden() {
        let (status, body) =
            body_json(AppError::internal_error("connection refused to 10.0.0.3")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["context"], "internal");
    }
}
