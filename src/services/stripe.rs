// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripe API client.
//!
//! Talks to the Stripe REST API directly with form-encoded requests.
//! Only the two operations the API exposes are implemented: cancel at
//! period end, and billing portal session creation.

use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Stripe call error. The upstream message is preserved so routes can
/// surface it.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Subscription object as returned by Stripe (wire field names).
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    pub customer: String,
    pub status: String,
    pub current_period_start: i64,
    /// Unix timestamp
    pub current_period_end: i64,
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

/// Billing portal session as returned by Stripe.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePortalSession {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    error: StripeApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeApiErrorBody {
    message: Option<String>,
}

/// Stripe API client shared across request handlers.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building Stripe HTTP client")?;

        Ok(Self { client, secret_key })
    }

    /// Flag a subscription to cancel at the end of the current period.
    ///
    /// The subscription stays active until then; Stripe returns the updated
    /// object, which the caller mirrors onto the user document.
    pub async fn cancel_at_period_end(
        &self,
        subscription_id: &str,
    ) -> Result<StripeSubscription, StripeError> {
        tracing::debug!(subscription_id, "Canceling Stripe subscription at period end");

        let form = [("cancel_at_period_end", "true")];

        self.stripe_request(
            reqwest::Method::POST,
            &format!("/subscriptions/{subscription_id}"),
            Some(&form),
        )
        .await
    }

    /// Create a billing portal session for a customer.
    pub async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<StripePortalSession, StripeError> {
        tracing::debug!(customer_id, "Creating Stripe billing portal session");

        let form = [("customer", customer_id), ("return_url", return_url)];

        self.stripe_request(
            reqwest::Method::POST,
            "/billing_portal/sessions",
            Some(&form),
        )
        .await
    }

    /// Make an authenticated request to Stripe.
    async fn stripe_request<T: for<'de> Deserialize<'de>>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<T, StripeError> {
        let url = format!("{STRIPE_API_BASE}{endpoint}");

        let mut request = self
            .client
            .request(method, &url)
            .basic_auth(&self.secret_key, Option::<&str>::None);

        if let Some(form_data) = form {
            request = request.form(form_data);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeApiError>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| format!("Stripe API returned status {status}"));
            tracing::error!(status = %status, message = %message, "Stripe API error");
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
