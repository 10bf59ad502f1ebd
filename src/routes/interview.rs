// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interview scoring route.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CategoryScore, Feedback, TranscriptMessage};
use crate::prompts;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/interview/score", post(score_interview))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub interview_id: Option<String>,
    #[serde(default)]
    pub transcript: Vec<TranscriptMessage>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub success: bool,
    pub feedback_id: Option<String>,
}

/// Scored result as the model returns it in JSON mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoredResult {
    total_score: u32,
    category_scores: Vec<CategoryScore>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    areas_for_improvement: Vec<String>,
    final_assessment: String,
}

/// Score a completed mock interview and store the feedback.
///
/// Missing and not-owned interviews are indistinguishable to the caller;
/// both answer as if the interview does not exist.
async fn score_interview(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>> {
    let interview_id = body
        .interview_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("interviewId is required".to_string()))?;

    if body.transcript.is_empty() {
        return Err(AppError::Validation("transcript must not be empty".to_string()));
    }

    let interview = state
        .db
        .get_interview(&interview_id)
        .await?
        .filter(|i| i.user_id == auth.uid)
        .ok_or_else(|| AppError::Validation("interview not found".to_string()))?;

    let gemini = state
        .gemini
        .as_ref()
        .ok_or(AppError::Unconfigured("GEMINI_API_KEY"))?;

    let prompt = prompts::interview_scoring_prompt(&interview.role, &body.transcript);
    let scored: ScoredResult = gemini.generate_json(&prompt).await?;

    let feedback = Feedback {
        id: None,
        interview_id: interview_id.clone(),
        user_id: auth.uid.clone(),
        total_score: scored.total_score.min(100),
        category_scores: scored.category_scores,
        strengths: scored.strengths,
        areas_for_improvement: scored.areas_for_improvement,
        final_assessment: scored.final_assessment,
        created_at: now_rfc3339(),
    };

    let stored = state.db.insert_feedback(&feedback).await?;

    tracing::info!(
        uid = %auth.uid,
        interview_id = %interview_id,
        total_score = feedback.total_score,
        "Interview scored"
    );

    Ok(Json(ScoreResponse {
        success: true,
        feedback_id: stored.id,
    }))
}
