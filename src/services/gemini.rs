// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini API client.
//!
//! Single point of entry for all Gemini calls: resume chat, PDF text
//! extraction, and interview scoring. Every operation is one
//! `generateContent` request with no retry; callers surface the upstream
//! message on failure.

use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all generation calls. Hardcoded so every route
/// generates with the same model.
pub const MODEL: &str = "gemini-2.0-flash";
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini call error categories.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid JSON in model response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

// ─── Request wire format ─────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

/// One part of a content block: text or inline binary data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
}

impl<'a> Part<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn pdf(base64_data: &'a str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "application/pdf",
                data: base64_data,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

// ─── Response wire format ────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let mut out = String::new();
        for part in &content.parts {
            if let Some(text) = &part.text {
                out.push_str(text);
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    error: GeminiApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiApiErrorBody {
    message: String,
}

/// Available model as reported by the models listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiModel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

// ─── Client ──────────────────────────────────────────────────────

/// Gemini API client shared across request handlers.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building Gemini HTTP client")?;

        Ok(Self { client, api_key })
    }

    /// Generate text from a plain prompt.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        let parts = vec![Part::text(prompt)];
        let response = self.generate(parts, None).await?;
        response.text().ok_or(GeminiError::EmptyContent)
    }

    /// Generate text from a prompt plus an inline PDF.
    pub async fn generate_with_pdf(
        &self,
        prompt: &str,
        pdf_base64: &str,
    ) -> Result<String, GeminiError> {
        let parts = vec![Part::text(prompt), Part::pdf(pdf_base64)];
        let response = self.generate(parts, None).await?;
        response.text().ok_or(GeminiError::EmptyContent)
    }

    /// Generate and parse a JSON response.
    ///
    /// Requests JSON output mode and additionally strips markdown fences,
    /// since models occasionally wrap JSON in them anyway.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
    ) -> Result<T, GeminiError> {
        let parts = vec![Part::text(prompt)];
        let config = GenerationConfig {
            response_mime_type: "application/json",
        };
        let response = self.generate(parts, Some(config)).await?;

        let text = response.text().ok_or(GeminiError::EmptyContent)?;
        let text = strip_json_fences(&text);

        serde_json::from_str(text).map_err(GeminiError::Parse)
    }

    /// List available models.
    pub async fn list_models(&self) -> Result<Vec<GeminiModel>, GeminiError> {
        let url = format!("{}/models", API_BASE_URL);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let listing: ListModelsResponse = response.json().await?;
        Ok(listing.models)
    }

    /// One `generateContent` call. No retry: a failure surfaces directly
    /// as this route's error.
    async fn generate(
        &self,
        parts: Vec<Part<'_>>,
        generation_config: Option<GenerationConfig>,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/models/{}:generateContent", API_BASE_URL, MODEL);

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &generated.usage_metadata {
            tracing::debug!(
                prompt_tokens = ?usage.prompt_token_count,
                output_tokens = ?usage.candidates_token_count,
                "Gemini call succeeded"
            );
        }

        if let Some(reason) = generated
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            if reason != "STOP" {
                tracing::warn!(finish_reason = reason, "Gemini generation stopped early");
            }
        }

        Ok(generated)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
