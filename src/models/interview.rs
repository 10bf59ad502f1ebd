// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Interview and interview-feedback models.

use serde::{Deserialize, Serialize};

/// Mock interview stored in Firestore.
///
/// Interviews are created by the web frontend; this service reads them for
/// the profile page and to authorize feedback scoring. Older documents may
/// lack newer fields, so non-identity fields default on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    /// Firestore document ID (populated on reads, never stored as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning Firebase Auth UID
    pub user_id: String,
    /// Target role (e.g. "Frontend Developer")
    #[serde(default)]
    pub role: String,
    /// Interview style ("technical", "behavioral", "mixed")
    #[serde(rename = "type", default)]
    pub interview_type: String,
    /// Experience level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Technologies covered
    #[serde(default)]
    pub techstack: Vec<String>,
    /// Generated questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
    /// Whether question generation finished
    #[serde(default)]
    pub finalized: bool,
    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Creation timestamp (RFC3339)
    #[serde(default)]
    pub created_at: String,
}

/// Scored feedback for a completed interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Firestore document ID (populated on reads, never stored as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Interview this feedback scores
    pub interview_id: String,
    /// Owning Firebase Auth UID
    pub user_id: String,
    /// Overall score, 0-100
    pub total_score: u32,
    /// Per-category scores in a fixed category order
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    /// Creation timestamp (RFC3339)
    pub created_at: String,
}

/// One scored category within interview feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub name: String,
    /// 0-100
    pub score: u32,
    pub comment: String,
}

/// One turn of an interview transcript as submitted for scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// "interviewer" or "candidate"
    pub role: String,
    pub content: String,
}
