// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile route: the signed-in user with their interviews.

use crate::error::{AppError, Result};
use crate::limits::{self, Feature, Plan};
use crate::middleware::auth::AuthUser;
use crate::models::{Subscription, User};
use crate::services::tech_icons::TechIcon;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use futures_util::{stream, StreamExt, TryStreamExt};
use serde::Serialize;
use std::sync::Arc;

/// Concurrent per-interview feedback lookups.
const FEEDBACK_FAN_OUT: usize = 4;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile))
}

// ─── Response shapes ─────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: ProfileUser,
    pub interviews: Vec<InterviewView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    pub usage: UsageReport,
}

/// Per-feature quota standing for the user's plan.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub plan: String,
    pub features: Vec<FeatureUsage>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsage {
    pub feature: &'static str,
    pub used: u32,
    /// `-1` means unlimited
    pub limit: i64,
    /// `-1` means unlimited
    pub remaining: i64,
    pub unlimited: bool,
    pub exhausted: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewView {
    pub id: String,
    pub role: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub techstack: Vec<String>,
    pub tech_icons: Vec<TechIcon>,
    pub finalized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: String,
    /// Null until the interview has been scored
    pub feedback: Option<FeedbackSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub total_score: u32,
    pub final_assessment: String,
    pub created_at: String,
}

// ─── Handler ─────────────────────────────────────────────────

/// Get the signed-in user's profile with their interviews.
///
/// A valid token whose user document is gone still yields 401: the auth
/// gate checks for a user, not just a token.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let Some(user) = state.db.get_user(&auth.uid).await? else {
        tracing::debug!(uid = %auth.uid, "Valid token but no user document");
        return Err(AppError::Unauthorized);
    };

    let interviews = state.db.get_interviews_for_user(&auth.uid).await?;

    // Per-interview feedback lookups fan out with a bounded buffer;
    // icon resolution already falls back per icon inside the resolver.
    let views: Vec<InterviewView> = stream::iter(interviews.into_iter().map(|interview| {
        let state = state.clone();
        let uid = auth.uid.clone();
        async move { interview_view(&state, &uid, interview).await }
    }))
    .buffered(FEEDBACK_FAN_OUT)
    .try_collect()
    .await?;

    let usage = usage_report(&user);

    Ok(Json(ProfileResponse {
        user: ProfileUser {
            uid: auth.uid,
            name: user.name,
            email: user.email,
            subscription: user.subscription,
            usage,
        },
        interviews: views,
    }))
}

async fn interview_view(
    state: &AppState,
    uid: &str,
    interview: crate::models::Interview,
) -> Result<InterviewView> {
    let id = interview.id.clone().unwrap_or_default();

    let feedback = if id.is_empty() {
        None
    } else {
        state.db.get_feedback_for_interview(&id, uid).await?
    };

    let tech_icons = state.tech_icons.resolve(&interview.techstack).await;

    Ok(InterviewView {
        id,
        role: interview.role,
        interview_type: interview.interview_type,
        level: interview.level,
        techstack: interview.techstack,
        tech_icons,
        finalized: interview.finalized,
        cover_image: interview.cover_image,
        created_at: interview.created_at,
        feedback: feedback.map(|f| FeedbackSummary {
            id: f.id,
            total_score: f.total_score,
            final_assessment: f.final_assessment,
            created_at: f.created_at,
        }),
    })
}

/// Compute the usage block from the user's plan and counters.
fn usage_report(user: &User) -> UsageReport {
    let plan_str = user
        .subscription
        .as_ref()
        .and_then(|s| s.plan.as_deref())
        .unwrap_or("free");
    let plan = Plan::parse(plan_str);
    let counters = user.usage.unwrap_or_default();

    let features = [
        ("coverLetters", Feature::CoverLetters, counters.cover_letters),
        ("resumes", Feature::Resumes, counters.resumes),
        ("studyPlans", Feature::StudyPlans, counters.study_plans),
        ("interviews", Feature::Interviews, counters.interviews),
    ]
    .into_iter()
    .map(|(name, feature, used)| {
        let limit = limits::feature_limit(plan, feature);
        FeatureUsage {
            feature: name,
            used,
            limit,
            remaining: limits::remaining_usage(used, limit),
            unlimited: limits::is_unlimited(limit),
            exhausted: limits::has_reached_limit(used, limit),
        }
    })
    .collect();

    UsageReport {
        plan: plan_str.to_string(),
        features,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UsageCounters;

    fn user_with(plan: Option<&str>, usage: UsageCounters) -> User {
        User {
            subscription: plan.map(|p| Subscription {
                plan: Some(p.to_string()),
                ..Default::default()
            }),
            usage: Some(usage),
            ..Default::default()
        }
    }

    #[test]
    fn test_usage_report_free_plan_clamps_remaining() {
        let report = usage_report(&user_with(
            Some("free"),
            UsageCounters {
                cover_letters: 5,
                resumes: 1,
                study_plans: 0,
                interviews: 3,
            },
        ));

        assert_eq!(report.plan, "free");
        let cover = &report.features[0];
        assert_eq!(cover.used, 5);
        assert_eq!(cover.limit, 3);
        assert_eq!(cover.remaining, 0);
        assert!(cover.exhausted);

        let resumes = &report.features[1];
        assert_eq!(resumes.remaining, 1);
        assert!(!resumes.exhausted);

        let interviews = &report.features[3];
        assert!(interviews.exhausted);
    }

    #[test]
    fn test_usage_report_premium_is_unlimited() {
        let report = usage_report(&user_with(
            Some("premium"),
            UsageCounters {
                cover_letters: 1000,
                resumes: 1000,
                study_plans: 1000,
                interviews: 1000,
            },
        ));

        for feature in &report.features {
            assert!(feature.unlimited);
            assert!(!feature.exhausted);
            assert_eq!(feature.remaining, -1);
        }
    }

    #[test]
    fn test_usage_report_missing_subscription_is_free() {
        let report = usage_report(&user_with(None, UsageCounters::default()));
        assert_eq!(report.plan, "free");
        assert_eq!(report.features[0].limit, 3);
    }
}
