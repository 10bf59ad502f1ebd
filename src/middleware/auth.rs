// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase ID-token authentication middleware.

use crate::error::AppError;
use crate::services::firebase_auth::AuthError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Session cookie set by the web frontend.
const SESSION_COOKIE: &str = "__session";

/// Authenticated principal injected into protected handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Firebase Auth UID
    pub uid: String,
    pub email: Option<String>,
}

/// Middleware that requires a valid Firebase ID token.
///
/// The token is taken from the `__session` cookie first, then from the
/// `Authorization: Bearer` header. Verification happens before any
/// handler code runs, so no database read is attempted for rejected
/// requests.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(extract_bearer_token) {
            Some(token) => token.to_string(),
            None => return Err(AppError::Unauthorized),
        }
    };

    let user = state
        .auth_verifier
        .verify_id_token(&token)
        .await
        .map_err(|e| match e {
            AuthError::Invalid(reason) => {
                tracing::debug!(reason = %reason, "Rejected ID token");
                AppError::InvalidToken
            }
            AuthError::Transient(reason) => {
                tracing::error!(reason = %reason, "Token verification infrastructure failure");
                AppError::Internal(anyhow::anyhow!(reason))
            }
        })?;

    let auth_user = AuthUser {
        uid: user.uid,
        email: user.email,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` value.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Bearer  spaced "), Some("spaced"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic dXNlcg=="), None);
        assert_eq!(extract_bearer_token("abc.def.ghi"), None);
    }
}
