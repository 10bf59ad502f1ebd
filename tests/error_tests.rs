// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AppError → HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prepdesk::error::AppError;
use serde_json::Value;

async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_auth_errors_are_401() {
    let (status, body) = render(AppError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    assert!(body.get("details").is_none());

    let (status, body) = render(AppError::InvalidToken).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_validation_is_400_with_details() {
    let (status, body) = render(AppError::Validation("email is required".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["details"], "email is required");
}

#[tokio::test]
async fn test_conflict_is_409() {
    let (status, body) = render(AppError::Conflict("already subscribed".to_string())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["details"], "already subscribed");
}

#[tokio::test]
async fn test_unconfigured_is_500_naming_the_key() {
    let (status, body) = render(AppError::Unconfigured("GEMINI_API_KEY")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "not_configured");
    assert_eq!(body["details"], "GEMINI_API_KEY is not configured");
}

#[tokio::test]
async fn test_upstream_failures_surface_the_message() {
    let (status, body) = render(AppError::Gemini("quota exceeded".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "gemini_error");
    assert_eq!(body["details"], "quota exceeded");

    let (status, body) = render(AppError::Stripe("no such subscription".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "stripe_error");
    assert_eq!(body["details"], "no such subscription");

    let (status, body) = render(AppError::Database("deadline exceeded".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    assert_eq!(body["details"], "deadline exceeded");
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let (status, body) = render(AppError::Internal(anyhow::anyhow!("secret stack info"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}
