// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Prepdesk API Server
//!
//! Backend API for the Prepdesk interview-preparation and resume-review
//! app: Firestore persistence, Firebase Auth identity, Stripe billing,
//! and Gemini-backed AI generation.

pub mod config;
pub mod db;
pub mod error;
pub mod limits;
pub mod middleware;
pub mod models;
pub mod prompts;
pub mod routes;
pub mod services;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use db::FirestoreDb;
use services::{FirebaseAuthVerifier, GeminiClient, StripeClient, TechIconService};

/// Shared application state.
///
/// Every upstream client is constructed once in `main` and injected here;
/// handlers never reach for module-level globals. Gemini and Stripe are
/// optional: routes that need a missing client answer `not_configured`.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub auth_verifier: Arc<FirebaseAuthVerifier>,
    pub gemini: Option<GeminiClient>,
    pub stripe: Option<StripeClient>,
    pub tech_icons: TechIconService,
}
