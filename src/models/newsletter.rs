// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Newsletter subscriber model.

use serde::{Deserialize, Serialize};

/// Newsletter subscriber document, keyed by normalized email.
///
/// Unsubscribing is a soft delete: the document stays with status
/// `unsubscribed` so a later re-subscribe can re-activate it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    /// Normalized (trimmed, lowercased) email, same as the document ID
    pub email: String,
    pub status: SubscriberStatus,
    /// When the subscription (or re-subscription) happened (RFC3339)
    pub subscribed_at: String,
    /// Set when status is `unsubscribed` (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed_at: Option<String>,
}

/// Subscriber lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    Active,
    Unsubscribed,
}

/// Result of a subscribe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// First subscription for this email
    Created,
    /// Email was unsubscribed and is active again
    Reactivated,
    /// Email is already an active subscriber
    AlreadyActive,
}

/// Normalize an email for use as a document key.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("User@Example.com "), "user@example.com");
        assert_eq!(normalize_email("  A@B.CO"), "a@b.co");
        assert_eq!(normalize_email("already@fine.dev"), "already@fine.dev");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubscriberStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&SubscriberStatus::Unsubscribed).unwrap(),
            "\"unsubscribed\""
        );
    }
}
