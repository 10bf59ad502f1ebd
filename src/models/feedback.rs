// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Product feedback submission model.

use serde::{Deserialize, Serialize};

/// A user's feedback about the product itself (not interview feedback).
///
/// Append-only: there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    /// Which feature the feedback is about (e.g. "resume-review")
    pub feature_type: String,
    /// Star rating, 1-5
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Firebase Auth UID when the submitter was signed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Page the feedback was submitted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Submission timestamp (RFC3339)
    pub created_at: String,
}
