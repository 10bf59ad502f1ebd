// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const INTERVIEWS: &str = "interviews";
    /// Interview feedback written by the scoring route
    pub const FEEDBACK: &str = "feedback";
    pub const RESUMES: &str = "resumes";
    /// Keyed by normalized email
    pub const NEWSLETTER_SUBSCRIBERS: &str = "newsletter_subscribers";
    /// Product feedback, append-only
    pub const FEEDBACK_SUBMISSIONS: &str = "feedback_submissions";
}
