// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resume metadata model.

use serde::{Deserialize, Serialize};

/// Resume metadata stored in Firestore.
///
/// The uploaded file itself lives in blob storage; this document only
/// tracks metadata and the extracted text. Documents written before text
/// extraction existed carry `createdAt` instead of `uploadDate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    /// Firestore document ID (populated on reads, never stored as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning Firebase Auth UID
    #[serde(default)]
    pub user_id: String,
    /// Original upload file name
    #[serde(default)]
    pub file_name: String,
    /// Blob storage URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Upload timestamp (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    /// Legacy creation timestamp (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Text extracted from the PDF
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    /// When extraction last ran (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_at: Option<String>,
}

impl Resume {
    /// Upload timestamp, falling back to `createdAt` for older documents.
    pub fn uploaded_at(&self) -> &str {
        self.upload_date
            .as_deref()
            .or(self.created_at.as_deref())
            .unwrap_or("")
    }
}
