use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;
use service::auth::domain::SessionUser;
use service::contacts::domain::{new_contact_from_json, parse_contact_id};
use service::contacts::Contact;

use common::types::MessageBody;

use crate::errors::{JsonApiError, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Contact id. Optional for reads, where omitting it (or leaving it empty)
    /// lists every contact.
    pub id: Option<String>,
}

#[utoipa::path(get, path = "/api/contacts", tag = "contacts",
    params(IdQuery),
    responses((status = 200, description = "One contact, or the caller's contacts newest first", body = Vec<crate::openapi::ContactDoc>),
              (status = 400, description = "Invalid id", body = crate::openapi::ErrorDoc),
              (status = 401, description = "No valid session", body = crate::openapi::ErrorDoc),
              (status = 404, description = "No such contact for this user", body = crate::openapi::ErrorDoc)))]
pub async fn read(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Query(q): Query<IdQuery>,
) -> Result<Response, JsonApiError> {
    // an empty `?id=` reads as no id
    match q.id.filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => {
            let id = parse_contact_id(&raw)?;
            let contact = state.contacts.get(session.user_id, id).await?;
            Ok(Json(contact).into_response())
        }
        None => Ok(Json(state.contacts.list(session.user_id).await?).into_response()),
    }
}

#[utoipa::path(post, path = "/api/contacts", tag = "contacts", request_body = crate::openapi::NewContactDoc,
    responses((status = 201, description = "Created", body = crate::openapi::ContactDoc),
              (status = 400, description = "Invalid fields", body = crate::openapi::ErrorDoc),
              (status = 401, description = "No valid session", body = crate::openapi::ErrorDoc)))]
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    JsonBody(body): JsonBody<Value>,
) -> Result<(StatusCode, Json<Contact>), JsonApiError> {
    let fields = new_contact_from_json(&body)?;
    let contact = state.contacts.create(session.user_id, fields).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

#[utoipa::path(put, path = "/api/contacts", tag = "contacts", request_body = crate::openapi::ContactPatchDoc,
    responses((status = 200, description = "Updated (or unchanged) contact", body = crate::openapi::ContactDoc),
              (status = 400, description = "Invalid id or fields", body = crate::openapi::ErrorDoc),
              (status = 401, description = "No valid session", body = crate::openapi::ErrorDoc),
              (status = 404, description = "No such contact for this user", body = crate::openapi::ErrorDoc)))]
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Contact>, JsonApiError> {
    Ok(Json(state.contacts.update(session.user_id, &body).await?))
}

#[utoipa::path(delete, path = "/api/contacts", tag = "contacts",
    params(IdQuery),
    responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
              (status = 400, description = "Missing or invalid id", body = crate::openapi::ErrorDoc),
              (status = 401, description = "No valid session", body = crate::openapi::ErrorDoc),
              (status = 404, description = "No such contact for this user", body = crate::openapi::ErrorDoc)))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Query(q): Query<IdQuery>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let raw = q.id.ok_or_else(|| JsonApiError::bad_request("contact id is required"))?;
    let id = parse_contact_id(&raw)?;
    state.contacts.delete(session.user_id, id).await?;
    Ok(Json(MessageBody::new(format!("contact {id} deleted"))))
}
