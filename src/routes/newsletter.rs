// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Newsletter subscribe / check-subscription routes.

use crate::error::{AppError, Result};
use crate::models::{normalize_email, SubscribeOutcome, SubscriberStatus};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::ValidateEmail;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/newsletter/subscribe", post(subscribe))
        .route("/api/newsletter/check-subscription", post(check_subscription))
}

#[derive(Deserialize)]
pub struct EmailRequest {
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct CheckSubscriptionResponse {
    pub subscribed: bool,
}

/// Subscribe an email to the newsletter.
///
/// 400 for missing or syntactically invalid emails (nothing written),
/// 409 when the normalized email is already an active subscriber,
/// 200 for a new subscription or a re-activation.
async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<SubscribeResponse>> {
    let email = body
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| e.validate_email())
        .ok_or_else(|| AppError::Validation("A valid email address is required".to_string()))?;

    let outcome = state.db.subscribe_newsletter(&email, &now_rfc3339()).await?;

    match outcome {
        SubscribeOutcome::AlreadyActive => Err(AppError::Conflict(
            "This email is already subscribed".to_string(),
        )),
        SubscribeOutcome::Created | SubscribeOutcome::Reactivated => Ok(Json(SubscribeResponse {
            success: true,
            message: "Successfully subscribed to the newsletter".to_string(),
        })),
    }
}

/// Check whether an email is an active subscriber.
///
/// Always 200: a missing or invalid email, or a database failure,
/// degrades to `subscribed: false` so the frontend form never breaks.
async fn check_subscription(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EmailRequest>,
) -> Json<CheckSubscriptionResponse> {
    let Some(email) = body
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| e.validate_email())
    else {
        return Json(CheckSubscriptionResponse { subscribed: false });
    };

    let subscribed = match state.db.get_newsletter_subscriber(&email).await {
        Ok(subscriber) => subscriber
            .map(|s| s.status == SubscriberStatus::Active)
            .unwrap_or(false),
        Err(e) => {
            tracing::warn!(error = %e, "Subscription check failed, reporting unsubscribed");
            false
        }
    };

    Json(CheckSubscriptionResponse { subscribed })
}
