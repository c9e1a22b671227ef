use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use common::metrics::SESSION_REJECTIONS_TOTAL;
use service::auth::domain::SessionUser;
use service::auth::token::TokenCodec;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Verified identity from the session cookie, or `None` when the cookie is
/// missing, malformed, expired or signed with another key.
pub fn resolve_session(jar: &CookieJar, tokens: &TokenCodec, cookie_name: &str) -> Option<SessionUser> {
    let cookie = jar.get(cookie_name)?;
    match tokens.verify(cookie.value()) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "session token rejected");
            SESSION_REJECTIONS_TOTAL.inc();
            None
        }
    }
}

/// Route layer for authenticated endpoints: 401 without a valid session,
/// otherwise the `SessionUser` is available as a request extension.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(user) = resolve_session(&jar, state.auth.tokens(), &state.cookie.name) else {
        return Err(JsonApiError::unauthorized("authentication required"));
    };
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
