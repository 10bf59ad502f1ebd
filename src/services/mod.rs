// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients and business logic.

pub mod firebase_auth;
pub mod gemini;
pub mod stripe;
pub mod tech_icons;

pub use firebase_auth::{AuthError, FirebaseAuthVerifier, FirebaseUser};
pub use gemini::{GeminiClient, GeminiError, GeminiModel};
pub use stripe::{StripeClient, StripeError, StripePortalSession, StripeSubscription};
pub use tech_icons::TechIconService;
