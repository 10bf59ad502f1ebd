// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod feedback;
pub mod interview;
pub mod newsletter;
pub mod resume;
pub mod user;

pub use feedback::FeedbackSubmission;
pub use interview::{CategoryScore, Feedback, Interview, TranscriptMessage};
pub use newsletter::{normalize_email, NewsletterSubscriber, SubscribeOutcome, SubscriberStatus};
pub use resume::Resume;
pub use user::{Subscription, UsageCounters, User};
