// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// Account lifecycle is owned by Firebase Auth; this service reads the
/// document and patches only the `subscription` sub-object. Field names
/// serialize camelCase to match documents written by the web frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Billing state mirrored from Stripe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    /// Per-feature usage counters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageCounters>,
    /// When the account document was created (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Subscription sub-object of a user document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Plan tier ("free", "starter", "pro", "premium")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Stripe subscription status ("active", "canceled", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Stripe customer ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,
    /// Stripe subscription ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_subscription_id: Option<String>,
    /// End of the current billing period (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<String>,
    /// Whether the subscription cancels at period end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
    /// Last time this sub-object was written (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Subscription {
    /// True when no field is set (an empty `{}` patch).
    pub fn is_empty(&self) -> bool {
        self.plan.is_none()
            && self.status.is_none()
            && self.stripe_customer_id.is_none()
            && self.stripe_subscription_id.is_none()
            && self.current_period_end.is_none()
            && self.cancel_at_period_end.is_none()
            && self.updated_at.is_none()
    }
}

/// Per-feature usage counters on a user document.
///
/// Counters are incremented by the app that creates the content; this
/// service only reads them to compute remaining quota.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounters {
    #[serde(default)]
    pub cover_letters: u32,
    #[serde(default)]
    pub resumes: u32,
    #[serde(default)]
    pub study_plans: u32,
    #[serde(default)]
    pub interviews: u32,
}
