// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripe billing routes: cancel at period end, billing portal.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Subscription;
use crate::services::stripe::StripeSubscription;
use crate::time_utils::{format_utc_rfc3339, now_rfc3339};
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/subscription/cancel-subscription",
            post(cancel_subscription),
        )
        .route(
            "/api/subscription/create-portal-session",
            post(create_portal_session),
        )
}

// ─── Cancel ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSubscriptionRequest {
    pub subscription_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSubscriptionResponse {
    pub message: String,
    pub subscription: SubscriptionView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    pub id: String,
    pub status: String,
    pub cancel_at_period_end: bool,
    /// RFC3339
    pub current_period_end: String,
}

/// Flag the subscription to cancel at the end of the billing period.
///
/// Stripe is the source of truth: its result is mirrored onto the user
/// document best-effort, and returned even when the mirror write fails.
/// The client-driven update-subscription route remains the
/// reconciliation path if the two ever diverge.
async fn cancel_subscription(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CancelSubscriptionRequest>,
) -> Result<Json<CancelSubscriptionResponse>> {
    let subscription_id = body
        .subscription_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("subscriptionId is required".to_string()))?;

    let stripe = state
        .stripe
        .as_ref()
        .ok_or(AppError::Unconfigured("STRIPE_SECRET_KEY"))?;

    let subscription = stripe.cancel_at_period_end(&subscription_id).await?;

    let period_end = unix_to_rfc3339(subscription.current_period_end);

    if let Err(e) = mirror_cancellation(&state, &auth.uid, &subscription, &period_end).await {
        tracing::error!(
            uid = %auth.uid,
            subscription_id = %subscription.id,
            error = %e,
            "Stripe cancel succeeded but Firestore mirror failed"
        );
    }

    Ok(Json(CancelSubscriptionResponse {
        message: "Subscription will cancel at the end of the billing period".to_string(),
        subscription: SubscriptionView {
            id: subscription.id,
            status: subscription.status,
            cancel_at_period_end: subscription.cancel_at_period_end,
            current_period_end: period_end,
        },
    }))
}

async fn mirror_cancellation(
    state: &AppState,
    uid: &str,
    subscription: &StripeSubscription,
    period_end: &str,
) -> Result<()> {
    let current = state
        .db
        .get_user(uid)
        .await?
        .and_then(|u| u.subscription)
        .unwrap_or_default();

    let mirrored = Subscription {
        status: Some(subscription.status.clone()),
        stripe_subscription_id: Some(subscription.id.clone()),
        current_period_end: Some(period_end.to_string()),
        cancel_at_period_end: Some(subscription.cancel_at_period_end),
        updated_at: Some(now_rfc3339()),
        ..current
    };

    state.db.set_user_subscription(uid, &mirrored).await
}

// ─── Billing Portal ──────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSessionRequest {
    pub customer_id: Option<String>,
    pub return_url: Option<String>,
}

#[derive(Serialize)]
pub struct PortalSessionResponse {
    pub url: String,
}

/// Open a Stripe billing portal session for the customer.
async fn create_portal_session(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<PortalSessionRequest>,
) -> Result<Json<PortalSessionResponse>> {
    let customer_id = body
        .customer_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("customerId is required".to_string()))?;

    let stripe = state
        .stripe
        .as_ref()
        .ok_or(AppError::Unconfigured("STRIPE_SECRET_KEY"))?;

    let return_url = body
        .return_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| format!("{}/profile", state.config.frontend_url));

    let session = stripe.create_portal_session(&customer_id, &return_url).await?;

    tracing::info!(uid = %auth.uid, customer_id = %customer_id, "Billing portal session created");

    Ok(Json(PortalSessionResponse { url: session.url }))
}

/// Stripe reports period boundaries as Unix timestamps; documents store
/// RFC3339 strings.
fn unix_to_rfc3339(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(format_utc_rfc3339)
        .unwrap_or_default()
}
