use std::sync::Arc;

use configs::AuthSettings;
use service::auth::errors::AuthError;
use service::auth::repository::AuthRepository;
use service::auth::{AuthConfig, AuthService};
use service::contacts::repository::ContactRepository;
use service::contacts::ContactService;

/// How the session cookie is written.
#[derive(Clone, Debug)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: i64,
}

impl From<&AuthSettings> for CookieSettings {
    fn from(s: &AuthSettings) -> Self {
        Self { name: s.cookie_name.clone(), secure: s.cookie_secure, max_age_secs: s.token_ttl_secs }
    }
}

/// Shared handler state. Repositories are trait objects so the router runs
/// against Postgres in production and in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub contacts: Arc<ContactService<dyn ContactRepository>>,
    pub cookie: CookieSettings,
}

impl AppState {
    pub fn new(
        auth_repo: Arc<dyn AuthRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        settings: &AuthSettings,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            auth: Arc::new(AuthService::new(auth_repo, AuthConfig::from(settings))?),
            contacts: Arc::new(ContactService::new(contact_repo)),
            cookie: CookieSettings::from(settings),
        })
    }
}
