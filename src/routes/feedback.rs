// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Product feedback route (append-only).

use crate::error::{AppError, Result};
use crate::middleware::auth::extract_bearer_token;
use crate::models::FeedbackSubmission;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::http::{header, HeaderMap};
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/feedback", post(submit_feedback))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub feature_type: Option<String>,
    /// Deserialized as a bare JSON number so out-of-range values (negative,
    /// fractional, too large) answer 400 instead of a deserialization 422.
    pub rating: Option<serde_json::Number>,
    pub comment: Option<String>,
    pub email: Option<String>,
    pub page: Option<String>,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
}

/// Store a feedback submission.
///
/// The route is public so signed-out visitors can submit too; when a
/// valid token is present the submission is attributed to its UID.
async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>> {
    let feature_type = body
        .feature_type
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| AppError::Validation("featureType is required".to_string()))?;

    let rating = body
        .rating
        .as_ref()
        .and_then(serde_json::Number::as_u64)
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| AppError::Validation("rating must be between 1 and 5".to_string()))?
        as u8;

    let user_id = optional_uid(&state, &headers).await;

    let submission = FeedbackSubmission {
        feature_type,
        rating,
        comment: body.comment.filter(|c| !c.trim().is_empty()),
        email: body.email.filter(|e| !e.trim().is_empty()),
        user_id,
        page: body.page,
        created_at: now_rfc3339(),
    };

    state.db.insert_feedback_submission(&submission).await?;

    tracing::info!(
        feature = %submission.feature_type,
        rating = submission.rating,
        "Feedback submission stored"
    );

    Ok(Json(FeedbackResponse {
        success: true,
        message: "Thanks for your feedback!".to_string(),
    }))
}

/// Best-effort identity for a public route: a bad or missing token just
/// means an anonymous submission.
async fn optional_uid(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)?;

    match state.auth_verifier.verify_id_token(token).await {
        Ok(user) => Some(user.uid),
        Err(_) => None,
    }
}
