// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diagnostic routes.

use crate::error::{AppError, Result};
use crate::services::GeminiModel;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/test-models", get(test_models))
}

#[derive(Serialize)]
pub struct TestModelsResponse {
    pub success: bool,
    pub models: Vec<GeminiModel>,
}

/// List the Gemini models that support content generation.
async fn test_models(State(state): State<Arc<AppState>>) -> Result<Json<TestModelsResponse>> {
    let gemini = state
        .gemini
        .as_ref()
        .ok_or(AppError::Unconfigured("GEMINI_API_KEY"))?;

    let models = gemini
        .list_models()
        .await?
        .into_iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == "generateContent")
        })
        .collect();

    Ok(Json(TestModelsResponse {
        success: true,
        models,
    }))
}
