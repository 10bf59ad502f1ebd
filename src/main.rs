// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prepdesk API Server
//!
//! Backend API for interview preparation and resume review: Firestore
//! persistence, Firebase Auth identity, Stripe billing, Gemini generation.

use prepdesk::{
    config::Config,
    db::FirestoreDb,
    services::{FirebaseAuthVerifier, GeminiClient, StripeClient, TechIconService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Prepdesk API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.firebase_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize the Firebase ID-token verifier
    let auth_verifier = Arc::new(
        FirebaseAuthVerifier::new(&config).expect("Failed to initialize Firebase token verifier"),
    );

    // Upstream clients are optional: routes that need a missing one
    // answer not_configured instead of preventing startup.
    let gemini = match &config.gemini_api_key {
        Some(key) => {
            tracing::info!("Gemini client initialized");
            Some(GeminiClient::new(key.clone()).expect("Failed to initialize Gemini client"))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; AI routes will report not_configured");
            None
        }
    };

    let stripe = match &config.stripe_secret_key {
        Some(key) => {
            tracing::info!("Stripe client initialized");
            Some(StripeClient::new(key.clone()).expect("Failed to initialize Stripe client"))
        }
        None => {
            tracing::warn!("STRIPE_SECRET_KEY not set; billing routes will report not_configured");
            None
        }
    };

    // Tech-icon resolver with its shared memo cache
    let tech_icons = TechIconService::new().expect("Failed to initialize tech icon service");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        auth_verifier,
        gemini,
        stripe,
        tech_icons,
    });

    // Build router
    let app = prepdesk::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prepdesk=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
