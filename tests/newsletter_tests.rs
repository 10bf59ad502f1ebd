// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Newsletter flow tests.
//!
//! The subscribe/conflict/reactivate flow needs the Firestore emulator;
//! the check-subscription degradation tests run offline.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use prepdesk::models::{NewsletterSubscriber, SubscriberStatus};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> axum::http::Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Unique email per run so emulator state does not leak between runs.
fn unique_email(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{tag}-{nanos}@example.com")
}

#[tokio::test]
async fn test_check_subscription_offline_degrades_to_false() {
    let (app, _) = common::create_test_app();

    // The DB is offline, but this route must never fail
    let response = post_json(
        app,
        "/api/newsletter/check-subscription",
        json!({ "email": "someone@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["subscribed"], false);
}

#[tokio::test]
async fn test_check_subscription_tolerates_missing_and_invalid_email() {
    let (app, _) = common::create_test_app();

    for body in [json!({}), json!({ "email": "not-an-email" })] {
        let response = post_json(app.clone(), "/api/newsletter/check-subscription", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["subscribed"], false);
    }
}

#[tokio::test]
async fn test_subscribe_then_duplicate_conflicts() {
    require_emulator!();

    let db = common::test_db().await;
    let (app, _) = common::create_test_app_with_db(db);
    let email = unique_email("dup");

    let response = post_json(
        app.clone(),
        "/api/newsletter/subscribe",
        json!({ "email": email.clone() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(app, "/api/newsletter/subscribe", json!({ "email": email })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_subscribe_normalizes_email_for_check() {
    require_emulator!();

    let db = common::test_db().await;
    let (app, _) = common::create_test_app_with_db(db);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();

    // Subscribe with stray case and whitespace
    let response = post_json(
        app.clone(),
        "/api/newsletter/subscribe",
        json!({ "email": format!("Norm-{nanos}@Example.com ") }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Check with the normalized form
    let response = post_json(
        app,
        "/api/newsletter/check-subscription",
        json!({ "email": format!("norm-{nanos}@example.com") }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["subscribed"], true);
}

#[tokio::test]
async fn test_resubscribe_after_unsubscribe_reactivates() {
    require_emulator!();

    let db = common::test_db().await;
    let email = unique_email("react");

    // Seed a soft-deleted subscriber, the state left behind by an
    // unsubscribe
    db.upsert_newsletter_subscriber(&NewsletterSubscriber {
        email: email.clone(),
        status: SubscriberStatus::Unsubscribed,
        subscribed_at: "2026-01-01T00:00:00Z".to_string(),
        unsubscribed_at: Some("2026-02-01T00:00:00Z".to_string()),
    })
    .await
    .unwrap();

    let (app, _) = common::create_test_app_with_db(db);

    // Re-subscribing succeeds instead of conflicting
    let response = post_json(
        app.clone(),
        "/api/newsletter/subscribe",
        json!({ "email": email.clone() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        "/api/newsletter/check-subscription",
        json!({ "email": email }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["subscribed"], true);
}

#[tokio::test]
async fn test_concurrent_subscribes_only_one_succeeds() {
    require_emulator!();

    let db = common::test_db().await;
    let (app, _) = common::create_test_app_with_db(db);
    let email = unique_email("race");

    // Both requests read-then-write inside a transaction over the same
    // document, so at most one may observe "no subscriber" and succeed.
    let (a, b) = tokio::join!(
        post_json(
            app.clone(),
            "/api/newsletter/subscribe",
            json!({ "email": email.clone() }),
        ),
        post_json(
            app.clone(),
            "/api/newsletter/subscribe",
            json!({ "email": email.clone() }),
        ),
    );

    let successes = [a.status(), b.status()]
        .iter()
        .filter(|s| **s == StatusCode::OK)
        .count();
    assert_eq!(successes, 1, "statuses: {} / {}", a.status(), b.status());

    // Either way the document ends up active
    let response = post_json(
        app,
        "/api/newsletter/check-subscription",
        json!({ "email": email }),
    )
    .await;
    let body = response_json(response).await;
    assert_eq!(body["subscribed"], true);
}

#[tokio::test]
async fn test_check_unknown_email_is_unsubscribed() {
    require_emulator!();

    let db = common::test_db().await;
    let (app, _) = common::create_test_app_with_db(db);

    let response = post_json(
        app,
        "/api/newsletter/check-subscription",
        json!({ "email": unique_email("never-subscribed") }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["subscribed"], false);
}
