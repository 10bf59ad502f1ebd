// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Upstream failures (Firestore, Stripe, Gemini) surface the upstream
/// message in `details`; the original service exposed it verbatim and
/// clients depend on it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service not configured: {0}")]
    Unconfigured(&'static str),

    #[error("Gemini API error: {0}")]
    Gemini(String),

    #[error("Stripe API error: {0}")]
    Stripe(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::services::GeminiError> for AppError {
    fn from(e: crate::services::GeminiError) -> Self {
        AppError::Gemini(e.to_string())
    }
}

impl From<crate::services::StripeError> for AppError {
    fn from(e: crate::services::StripeError) -> Self {
        AppError::Stripe(e.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::Unconfigured(what) => {
                tracing::error!(missing = what, "Rejected request to unconfigured service");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "not_configured",
                    Some(format!("{} is not configured", what)),
                )
            }
            AppError::Gemini(msg) => {
                tracing::error!(error = %msg, "Gemini API error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "gemini_error",
                    Some(msg.clone()),
                )
            }
            AppError::Stripe(msg) => {
                tracing::error!(error = %msg, "Stripe API error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "stripe_error",
                    Some(msg.clone()),
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    Some(msg.clone()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
