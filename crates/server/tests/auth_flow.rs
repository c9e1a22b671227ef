mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;

use support::{app, login, register, request, raw_json, send};

#[tokio::test]
async fn test_register_and_login_flow() {
    let app = app();

    let reply = register(&app, "a@b.com", "secret1").await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert!(reply.body["message"].is_string());

    let reply = login(&app, "A@B.com", "secret1").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"user": {"email": "a@b.com", "name": "Tester"}}));

    // the token travels only in the cookie
    let set_cookie = reply.set_cookie();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=3600"));
    assert!(!set_cookie.contains("Secure"));
    assert!(reply.body.get("token").is_none());
}

#[tokio::test]
async fn test_register_requires_fields() {
    let app = app();
    for body in [
        json!({"password": "secret1", "name": "N"}),
        json!({"email": "a@b.com", "name": "N"}),
        json!({"email": "a@b.com", "password": "secret1"}),
        json!({"email": "a@b.com", "password": "secret1", "name": "   "}),
    ] {
        let reply = send(&app, request(Method::POST, "/api/register", Some(body), None)).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.body["error"].is_string());
    }
}

#[tokio::test]
async fn test_register_short_password_and_bad_email_rejected() {
    let app = app();
    assert_eq!(register(&app, "a@b.com", "12345").await.status, StatusCode::BAD_REQUEST);
    assert_eq!(register(&app, "not-an-email", "secret1").await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = app();
    assert_eq!(register(&app, "dup@b.com", "secret1").await.status, StatusCode::CREATED);

    let reply = register(&app, "DUP@b.com", "another1").await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    // first user's credentials are untouched
    assert_eq!(login(&app, "dup@b.com", "secret1").await.status, StatusCode::OK);
    assert_eq!(login(&app, "dup@b.com", "another1").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_wrong_password_is_401_not_404() {
    let app = app();
    register(&app, "a@b.com", "secret1").await;

    assert_eq!(login(&app, "a@b.com", "wrong").await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login(&app, "a@b.com", "").await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login(&app, "nobody@b.com", "secret1").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = app();
    let reply = send(&app, request(Method::POST, "/api/login", Some(json!({"email": "a@b.com"})), None)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let reply = send(&app, request(Method::POST, "/api/login", Some(json!({"password": "x"})), None)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    // blank email is missing, not an unknown account
    assert_eq!(register(&app, "a@b.com", "secret1").await.status, StatusCode::CREATED);
    for email in ["", "   "] {
        let reply = send(&app, request(Method::POST, "/api/login", Some(json!({"email": email, "password": "secret1"})), None)).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body["error"], "email and password are required");
    }
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = app();
    let reply = send(&app, raw_json(Method::POST, "/api/login", "{not json", None)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["error"].is_string());

    // wrong JSON type for a field
    let reply = send(&app, request(Method::POST, "/api/register", Some(json!({"email": 5, "password": "secret1", "name": "N"})), None)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_and_logout() {
    let app = app();
    let cookie = support::session(&app, "me@b.com").await;

    let reply = send(&app, request(Method::GET, "/api/me", None, Some(&cookie))).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["email"], "me@b.com");

    let reply = send(&app, request(Method::GET, "/api/me", None, None)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(&app, request(Method::POST, "/api/logout", None, Some(&cookie))).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    let cleared = reply.set_cookie();
    assert!(cleared.starts_with("token="));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_health_metrics_and_docs() {
    let app = app();
    let reply = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"status": "ok"}));

    register(&app, "m@b.com", "secret1").await;
    let reply = send(&app, request(Method::GET, "/metrics", None, None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.as_str().unwrap_or_default().contains("agenda_auth_events_total"));

    let reply = send(&app, request(Method::GET, "/api-docs/openapi.json", None, None)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body["paths"]["/api/contacts"].is_object());
}
