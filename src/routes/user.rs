// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User subscription mirror route.
//!
//! The frontend pushes Stripe state here after checkout completes; the
//! handler merge-patches the `subscription` sub-object of the current
//! user's document.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Subscription;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/user/update-subscription", post(update_subscription))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub subscription_data: Option<Subscription>,
}

#[derive(Serialize)]
pub struct UpdateSubscriptionResponse {
    pub success: bool,
    pub message: String,
}

/// Merge the submitted fields into the user's subscription sub-object.
///
/// Fetch-modify-write so fields the client did not send survive; only
/// `updatedAt` is always overwritten.
async fn update_subscription(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<UpdateSubscriptionRequest>,
) -> Result<Json<UpdateSubscriptionResponse>> {
    let patch = body
        .subscription_data
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("subscriptionData is required".to_string()))?;

    let current = state
        .db
        .get_user(&auth.uid)
        .await?
        .and_then(|u| u.subscription)
        .unwrap_or_default();

    let merged = merge_subscription(current, patch);
    state.db.set_user_subscription(&auth.uid, &merged).await?;

    tracing::info!(uid = %auth.uid, plan = ?merged.plan, "Subscription updated");

    Ok(Json(UpdateSubscriptionResponse {
        success: true,
        message: "Subscription updated".to_string(),
    }))
}

/// Field-wise merge: submitted fields win, absent fields keep their
/// stored value.
fn merge_subscription(current: Subscription, patch: Subscription) -> Subscription {
    Subscription {
        plan: patch.plan.or(current.plan),
        status: patch.status.or(current.status),
        stripe_customer_id: patch.stripe_customer_id.or(current.stripe_customer_id),
        stripe_subscription_id: patch
            .stripe_subscription_id
            .or(current.stripe_subscription_id),
        current_period_end: patch.current_period_end.or(current.current_period_end),
        cancel_at_period_end: patch.cancel_at_period_end.or(current.cancel_at_period_end),
        updated_at: Some(now_rfc3339()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_absent_fields() {
        let current = Subscription {
            plan: Some("starter".to_string()),
            status: Some("active".to_string()),
            stripe_customer_id: Some("cus_123".to_string()),
            ..Default::default()
        };
        let patch = Subscription {
            plan: Some("pro".to_string()),
            ..Default::default()
        };

        let merged = merge_subscription(current, patch);

        assert_eq!(merged.plan.as_deref(), Some("pro"));
        assert_eq!(merged.status.as_deref(), Some("active"));
        assert_eq!(merged.stripe_customer_id.as_deref(), Some("cus_123"));
        assert!(merged.updated_at.is_some());
    }

    #[test]
    fn test_empty_patch_is_rejected_by_validation() {
        assert!(Subscription::default().is_empty());
        assert!(!Subscription {
            plan: Some("free".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
