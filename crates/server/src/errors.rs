use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ValidationErrors;
use serde::de::DeserializeOwned;
use serde_json::json;
use service::auth::errors::AuthError;
use service::contacts::errors::ContactError;
use thiserror::Error;
use tracing::error;

/// The single error type returned by handlers. Renders `{"error": ...}`,
/// plus `"fields"` for schema validation failures. 5xx details are logged
/// and never sent to the client.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub fields: Option<ValidationErrors>,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), fields: None, detail }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message, None)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error", Some(detail.into()))
    }

    pub fn validation(errs: ValidationErrors) -> Self {
        let mut e = Self::bad_request(errs.first_message());
        e.fields = Some(errs);
        e
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = self.detail.as_deref().unwrap_or(""), "request failed");
            return (self.status, Json(json!({"error": "internal server error"}))).into_response();
        }
        let body = match self.fields {
            Some(fields) => json!({"error": self.message, "fields": fields}),
            None => json!({"error": self.message}),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => Self::bad_request(msg),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, "email already registered", None),
            AuthError::NotFound => Self::new(StatusCode::NOT_FOUND, "user not found", None),
            AuthError::Unauthorized => Self::unauthorized("invalid password"),
            other => Self::internal(format!("auth error {}: {}", other.code(), other)),
        }
    }
}

impl From<ContactError> for JsonApiError {
    fn from(e: ContactError) -> Self {
        match e {
            ContactError::BadRequest(msg) => Self::bad_request(msg),
            ContactError::Validation(errs) => Self::validation(errs),
            ContactError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string(), None),
            ContactError::Conflict(_) => Self::new(StatusCode::CONFLICT, e.to_string(), None),
            ContactError::Repository(_) => Self::internal(format!("contact error {}: {}", e.code(), e)),
        }
    }
}

/// `Json<T>` whose rejections (bad syntax, wrong content type, shape
/// mismatch) are all 400 `{"error": ...}`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> JsonApiError {
    JsonApiError::bad_request(format!("invalid request body: {}", rejection.body_text()))
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
