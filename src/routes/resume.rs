// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resume routes: AI chat, PDF text extraction, and listing.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::prompts;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Extractions shorter than this (after trimming) are treated as failed
/// regardless of what the model returned.
const MIN_EXTRACTED_TEXT_LEN: usize = 50;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/resume/ai-chat", post(ai_chat))
        .route("/api/resume/extract-pdf-text", post(extract_pdf_text))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/resume/list", get(list_resumes))
}

// ─── AI Chat ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiChatRequest {
    pub message: Option<String>,
    pub context: Option<String>,
    pub resume_text: Option<String>,
}

#[derive(Serialize)]
pub struct AiChatResponse {
    pub success: bool,
    pub response: String,
}

/// Answer a question about the user's resume.
async fn ai_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AiChatRequest>,
) -> Result<Json<AiChatResponse>> {
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation("message is required".to_string()))?;

    let gemini = state
        .gemini
        .as_ref()
        .ok_or(AppError::Unconfigured("GEMINI_API_KEY"))?;

    let prompt = prompts::resume_chat_prompt(
        &message,
        body.context.as_deref(),
        body.resume_text.as_deref(),
    );

    let response = gemini.generate_text(&prompt).await?;

    Ok(Json(AiChatResponse {
        success: true,
        response,
    }))
}

// ─── PDF Text Extraction ─────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractPdfRequest {
    pub resume_id: Option<String>,
    pub pdf_base64: Option<String>,
}

#[derive(Serialize)]
pub struct ExtractPdfResponse {
    pub success: bool,
    pub text: String,
}

/// Extract text from an uploaded PDF via Gemini.
///
/// The extracted text is mirrored onto the resume document best-effort;
/// a failed mirror write is logged but does not fail the request.
async fn extract_pdf_text(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExtractPdfRequest>,
) -> Result<Json<ExtractPdfResponse>> {
    let resume_id = body
        .resume_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("resumeId is required".to_string()))?;

    let pdf_base64 = body
        .pdf_base64
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::Validation("pdfBase64 is required".to_string()))?;

    let pdf_base64 = strip_data_url_prefix(&pdf_base64);

    // Decode to validate; the API itself takes the base64 string.
    STANDARD
        .decode(pdf_base64)
        .map_err(|_| AppError::Validation("pdfBase64 is not valid base64".to_string()))?;

    let gemini = state
        .gemini
        .as_ref()
        .ok_or(AppError::Unconfigured("GEMINI_API_KEY"))?;

    let text = gemini
        .generate_with_pdf(prompts::pdf_extraction_prompt(), pdf_base64)
        .await?;

    let text = validate_extracted_text(&text)?;

    if let Err(e) = state
        .db
        .set_resume_extracted_text(&resume_id, &text, &now_rfc3339())
        .await
    {
        tracing::error!(resume_id = %resume_id, error = %e, "Failed to mirror extracted text");
    }

    Ok(Json(ExtractPdfResponse {
        success: true,
        text,
    }))
}

/// Trim the model output and reject extractions that are too short to be
/// a real resume. Counted in characters, not bytes, so non-ASCII resumes
/// are not penalized.
fn validate_extracted_text(text: &str) -> Result<String> {
    let text = text.trim();
    let chars = text.chars().count();
    if chars < MIN_EXTRACTED_TEXT_LEN {
        return Err(AppError::Gemini(format!(
            "Extracted text is too short ({} characters); the PDF may be image-only or empty",
            chars
        )));
    }
    Ok(text.to_string())
}

/// Tolerate `data:application/pdf;base64,` prefixes from frontend file
/// readers.
fn strip_data_url_prefix(data: &str) -> &str {
    match data.split_once("base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    }
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeView {
    pub id: String,
    pub file_name: String,
    pub upload_date: String,
}

/// List the signed-in user's resumes, newest first.
async fn list_resumes(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ResumeListResponse>> {
    let resumes = state.db.get_resumes_for_user(&auth.uid).await?;

    let resumes = resumes
        .into_iter()
        .map(|r| ResumeView {
            id: r.id.clone().unwrap_or_default(),
            file_name: r.file_name.clone(),
            upload_date: r.uploaded_at().to_string(),
        })
        .collect();

    Ok(Json(ResumeListResponse { resumes }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(
            strip_data_url_prefix("data:application/pdf;base64,JVBERi0x"),
            "JVBERi0x"
        );
        assert_eq!(strip_data_url_prefix("JVBERi0x"), "JVBERi0x");
        // A stray "base64," without a data: scheme is left alone
        assert_eq!(strip_data_url_prefix("xbase64,abc"), "xbase64,abc");
    }

    #[test]
    fn test_validate_extracted_text_length_floor() {
        let short = "x".repeat(MIN_EXTRACTED_TEXT_LEN - 1);
        assert!(matches!(
            validate_extracted_text(&short),
            Err(AppError::Gemini(_))
        ));

        let exact = "x".repeat(MIN_EXTRACTED_TEXT_LEN);
        assert_eq!(validate_extracted_text(&exact).unwrap(), exact);

        // Trailing whitespace does not count toward the floor
        let padded = format!("{}   \n", short);
        assert!(validate_extracted_text(&padded).is_err());
    }

    #[test]
    fn test_validate_extracted_text_counts_chars_not_bytes() {
        // 50 CJK characters are 150 bytes but still exactly at the floor
        let cjk = "简".repeat(MIN_EXTRACTED_TEXT_LEN);
        assert!(cjk.len() > MIN_EXTRACTED_TEXT_LEN);
        assert_eq!(validate_extracted_text(&cjk).unwrap(), cjk);

        let cjk_short = "简".repeat(MIN_EXTRACTED_TEXT_LEN - 1);
        assert!(cjk_short.len() > MIN_EXTRACTED_TEXT_LEN);
        assert!(validate_extracted_text(&cjk_short).is_err());
    }
}
