// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Upstream API keys are optional: routes that need a missing key fail with
//! a `not_configured` error instead of preventing startup.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase/GCP project ID (Firestore project and ID-token audience)
    pub firebase_project_id: String,
    /// Frontend URL (CORS origin, billing-portal return base)
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// Gemini API key; AI routes report `not_configured` when absent
    pub gemini_api_key: Option<String>,
    /// Stripe secret key; billing routes report `not_configured` when absent
    pub stripe_secret_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            firebase_project_id: env::var("FIREBASE_PROJECT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_PROJECT_ID"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Config for tests: no upstream keys, fixed project.
    pub fn test_default() -> Self {
        Self {
            firebase_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            gemini_api_key: None,
            stripe_secret_key: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("FIREBASE_PROJECT_ID", "demo-project");
        env::remove_var("PORT");
        env::remove_var("GEMINI_API_KEY");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.firebase_project_id, "demo-project");
        assert_eq!(config.port, 8080);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_blank_keys_are_treated_as_unset() {
        env::set_var("FIREBASE_PROJECT_ID", "demo-project");
        env::set_var("STRIPE_SECRET_KEY", "   ");

        let config = Config::from_env().expect("Config should load");
        assert!(config.stripe_secret_key.is_none());

        env::remove_var("STRIPE_SECRET_KEY");
    }
}
