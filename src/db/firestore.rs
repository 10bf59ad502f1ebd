// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile reads, subscription patches)
//! - Interviews and their feedback
//! - Resumes (metadata and extracted text)
//! - Newsletter subscribers
//! - Product feedback submissions

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::db::collections;
use crate::error::AppError;
use crate::models::{
    Feedback, FeedbackSubmission, Interview, NewsletterSubscriber, Resume, SubscribeOutcome,
    SubscriberStatus, Subscription, User,
};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
    /// Operations attempted through this handle, shared across clones.
    ops: Arc<AtomicU64>,
}

/// Write shape for patching only the `subscription` field of a user.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionPatch {
    subscription: Subscription,
}

/// Write shape for mirroring extracted text onto a resume.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResumeTextPatch {
    extracted_text: String,
    extracted_at: String,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            ops: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
            ops: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            ops: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Helper to get the client or return an error if offline.
    ///
    /// Counts every attempt so callers can observe whether a request
    /// touched the database at all.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Number of operations attempted through this handle.
    pub fn op_count(&self) -> u64 {
        self.ops.load(Ordering::Relaxed)
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user document by Firebase Auth UID.
    pub async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replace the `subscription` sub-object of a user document.
    ///
    /// Uses a field mask so the rest of the document is untouched. The
    /// document is created if it does not exist yet.
    pub async fn set_user_subscription(
        &self,
        uid: &str,
        subscription: &Subscription,
    ) -> Result<(), AppError> {
        let patch = SubscriptionPatch {
            subscription: subscription.clone(),
        };
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(["subscription"])
            .in_col(collections::USERS)
            .document_id(uid)
            .object(&patch)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Interview Operations ────────────────────────────────────

    /// Get all interviews for a user, newest first.
    pub async fn get_interviews_for_user(&self, uid: &str) -> Result<Vec<Interview>, AppError> {
        let uid = uid.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::INTERVIEWS)
            .filter(move |q| q.for_all([q.field("userId").eq(uid.clone())]))
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an interview by document ID.
    pub async fn get_interview(&self, interview_id: &str) -> Result<Option<Interview>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::INTERVIEWS)
            .obj()
            .one(interview_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Feedback Operations ─────────────────────────────────────

    /// Get the feedback for an interview, scoped to its owner.
    pub async fn get_feedback_for_interview(
        &self,
        interview_id: &str,
        uid: &str,
    ) -> Result<Option<Feedback>, AppError> {
        let interview_id = interview_id.to_string();
        let uid = uid.to_string();
        let results: Vec<Feedback> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::FEEDBACK)
            .filter(move |q| {
                q.for_all([
                    q.field("interviewId").eq(interview_id.clone()),
                    q.field("userId").eq(uid.clone()),
                ])
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(results.into_iter().next())
    }

    /// Store interview feedback under a generated document ID.
    ///
    /// Returns the stored document with its ID populated.
    pub async fn insert_feedback(&self, feedback: &Feedback) -> Result<Feedback, AppError> {
        self.get_client()?
            .fluent()
            .insert()
            .into(collections::FEEDBACK)
            .generate_document_id()
            .object(feedback)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Resume Operations ───────────────────────────────────────

    /// Get all resumes for a user, newest first.
    ///
    /// Sorted in memory because older documents carry `createdAt` instead
    /// of `uploadDate` and Firestore cannot order across both.
    pub async fn get_resumes_for_user(&self, uid: &str) -> Result<Vec<Resume>, AppError> {
        let uid = uid.to_string();
        let mut resumes: Vec<Resume> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::RESUMES)
            .filter(move |q| q.for_all([q.field("userId").eq(uid.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        resumes.sort_by(|a, b| b.uploaded_at().cmp(a.uploaded_at()));
        Ok(resumes)
    }

    /// Mirror extracted text onto a resume document.
    ///
    /// Uses a field mask so unrelated resume fields are untouched.
    pub async fn set_resume_extracted_text(
        &self,
        resume_id: &str,
        text: &str,
        extracted_at: &str,
    ) -> Result<(), AppError> {
        let patch = ResumeTextPatch {
            extracted_text: text.to_string(),
            extracted_at: extracted_at.to_string(),
        };
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(["extractedText", "extractedAt"])
            .in_col(collections::RESUMES)
            .document_id(resume_id)
            .object(&patch)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Newsletter Operations ───────────────────────────────────

    /// Look up a subscriber by normalized email.
    pub async fn get_newsletter_subscriber(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::NEWSLETTER_SUBSCRIBERS)
            .obj()
            .one(email)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write a subscriber document as-is, outside any transaction.
    ///
    /// Unlike [`subscribe_newsletter`](Self::subscribe_newsletter) this does
    /// not inspect existing state; it is the raw write primitive for
    /// administrative corrections and for seeding known states.
    pub async fn upsert_newsletter_subscriber(
        &self,
        subscriber: &NewsletterSubscriber,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::NEWSLETTER_SUBSCRIBERS)
            .document_id(&subscriber.email)
            .object(subscriber)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Subscribe an email to the newsletter, transactionally.
    ///
    /// The read and the conditional write run inside one Firestore
    /// transaction so two concurrent subscribes of the same email cannot
    /// both observe "no subscriber" and both insert.
    ///
    /// `email` must already be normalized; it doubles as the document ID.
    pub async fn subscribe_newsletter(
        &self,
        email: &str,
        now: &str,
    ) -> Result<SubscribeOutcome, AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Bind the duplicate-check read to the transaction so a concurrent
        // subscribe of the same email conflicts at commit instead of both
        // observing "no subscriber".
        let txn_client = client.clone_with_consistency_selector(
            firestore::FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ),
        );

        let existing: Option<NewsletterSubscriber> = txn_client
            .fluent()
            .select()
            .by_id_in(collections::NEWSLETTER_SUBSCRIBERS)
            .obj()
            .one(email)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read subscriber in transaction: {}", e))
            })?;

        let outcome = match &existing {
            Some(sub) if sub.status == SubscriberStatus::Active => {
                // Nothing to write
                let _ = transaction.rollback().await;
                return Ok(SubscribeOutcome::AlreadyActive);
            }
            Some(_) => SubscribeOutcome::Reactivated,
            None => SubscribeOutcome::Created,
        };

        // Full-document write: re-activation also clears unsubscribedAt
        let subscriber = NewsletterSubscriber {
            email: email.to_string(),
            status: SubscriberStatus::Active,
            subscribed_at: now.to_string(),
            unsubscribed_at: None,
        };

        client
            .fluent()
            .update()
            .in_col(collections::NEWSLETTER_SUBSCRIBERS)
            .document_id(email)
            .object(&subscriber)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add subscriber to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(email, outcome = ?outcome, "Newsletter subscription written");

        Ok(outcome)
    }

    // ─── Product Feedback Operations ─────────────────────────────

    /// Append a product feedback submission under a generated document ID.
    pub async fn insert_feedback_submission(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::FEEDBACK_SUBMISSIONS)
            .generate_document_id()
            .object(submission)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
