#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use configs::AuthSettings;
use serde_json::{json, Value};
use server::routes::build_router;
use server::state::AppState;
use service::auth::repository::mock::MockAuthRepository;
use service::contacts::repository::mock::MockContactRepository;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

pub fn settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: "test-secret".into(),
        argon2_memory_kib: 1024,
        argon2_iterations: 1,
        ..Default::default()
    }
}

/// Router over in-memory repositories; no database needed.
pub fn app() -> Router {
    let state = AppState::new(
        Arc::new(MockAuthRepository::default()),
        Arc::new(MockContactRepository::default()),
        &settings(),
    )
    .expect("state");
    build_router(state, CorsLayer::very_permissive(), None)
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    /// `name=value` of the `Set-Cookie` header, ready to send back.
    pub fn cookie(&self) -> Option<String> {
        let raw = self.headers.get(header::SET_COOKIE)?.to_str().ok()?;
        raw.split(';').next().map(str::to_string)
    }

    pub fn set_cookie(&self) -> String {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Reply {
    let resp = app.clone().oneshot(req).await.expect("infallible");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    Reply { status, headers, body }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        b = b.header(header::COOKIE, c);
    }
    match body {
        Some(v) => b
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .expect("request"),
        None => b.body(Body::empty()).expect("request"),
    }
}

pub fn raw_json(method: Method, uri: &str, raw: &'static str, cookie: Option<&str>) -> Request<Body> {
    let mut b = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(c) = cookie {
        b = b.header(header::COOKIE, c);
    }
    b.body(Body::from(raw)).expect("request")
}

pub async fn register(app: &Router, email: &str, password: &str) -> Reply {
    let body = json!({"email": email, "password": password, "name": "Tester"});
    send(app, request(Method::POST, "/api/register", Some(body), None)).await
}

pub async fn login(app: &Router, email: &str, password: &str) -> Reply {
    let body = json!({"email": email, "password": password});
    send(app, request(Method::POST, "/api/login", Some(body), None)).await
}

/// Register, log in and return the session cookie.
pub async fn session(app: &Router, email: &str) -> String {
    assert_eq!(register(app, email, "secret1").await.status, StatusCode::CREATED);
    let reply = login(app, email, "secret1").await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.cookie().expect("session cookie")
}
