use std::sync::Arc;

use common::metrics::record_auth_event;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password::PasswordService;
use super::repository::AuthRepository;
use super::token::TokenCodec;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
}

impl From<&configs::AuthSettings> for AuthConfig {
    fn from(s: &configs::AuthSettings) -> Self {
        Self {
            jwt_secret: s.jwt_secret.clone(),
            token_ttl_secs: s.token_ttl_secs,
            argon2_memory_kib: s.argon2_memory_kib,
            argon2_iterations: s.argon2_iterations,
        }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    passwords: PasswordService,
    tokens: TokenCodec,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Result<Self, AuthError> {
        let passwords = PasswordService::new(cfg.argon2_memory_kib, cfg.argon2_iterations)?;
        let tokens = TokenCodec::new(&cfg.jwt_secret, cfg.token_ttl_secs);
        Ok(Self { repo, passwords, tokens })
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 3600, argon2_memory_kib: 1024, argon2_iterations: 1 };
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), cfg).unwrap();
    /// let input = RegisterInput { email: " User@Example.com".into(), name: "Test".into(), password: "secret1".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        let email = models::user::normalize_email(&input.email);
        let name = input.name.trim();
        if email.is_empty() || name.is_empty() || input.password.trim().is_empty() {
            return Err(AuthError::Validation("email, password and name are required".into()));
        }
        if !email.contains('@') {
            return Err(AuthError::Validation("invalid email".into()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if let Some(existing) = self.repo.find_user_by_email(&email).await? {
            debug!("user exists: {}", existing.email);
            record_auth_event("register_conflict");
            return Err(AuthError::Conflict);
        }

        let hash = self.hash_password(input.password).await?;
        let user = self
            .repo
            .create_user(&email, name, hash, PasswordService::ALGORITHM)
            .await
            .inspect_err(|e| {
                if matches!(e, AuthError::Conflict) {
                    record_auth_event("register_conflict");
                }
            })?;
        record_auth_event("register_ok");
        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a session token.
    ///
    /// Unknown email is `NotFound`; a wrong (or empty) password is `Unauthorized`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 3600, argon2_memory_kib: 1024, argon2_iterations: 1 };
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), cfg).unwrap();
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), name: "N".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert_eq!(svc.tokens().verify(&session.token).unwrap().user_id, session.user.id);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = models::user::normalize_email(&input.email);
        let Some(user) = self.repo.find_user_by_email(&email).await? else {
            record_auth_event("login_unknown_user");
            return Err(AuthError::NotFound);
        };

        let Some(cred) = self.repo.get_credentials(user.id).await? else {
            warn!(user_id = %user.id, "user has no credentials row");
            record_auth_event("login_bad_password");
            return Err(AuthError::Unauthorized);
        };

        if !self.verify_password(input.password, cred.password_hash).await? {
            record_auth_event("login_bad_password");
            return Err(AuthError::Unauthorized);
        }

        let token = self.tokens.issue(&user)?;
        record_auth_event("login_ok");
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// The user behind a verified session.
    pub async fn current_user(&self, user_id: Uuid) -> Result<AuthUser, AuthError> {
        self.repo.find_user_by_id(user_id).await?.ok_or(AuthError::NotFound)
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AuthError::HashError(e.to_string()))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::HashError(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> AuthService<MockAuthRepository> {
        let cfg = AuthConfig {
            jwt_secret: "test-secret".into(),
            token_ttl_secs: 3600,
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
        };
        AuthService::new(Arc::new(MockAuthRepository::default()), cfg).unwrap()
    }

    fn reg(email: &str, password: &str) -> RegisterInput {
        RegisterInput { email: email.into(), name: "Ana".into(), password: password.into() }
    }

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput { email: email.into(), password: password.into() }
    }

    #[tokio::test]
    async fn register_validates_input() {
        let svc = svc();
        for input in [reg("", "secret1"), reg("a@b.com", "   "), reg("no-at-sign", "secret1"), reg("a@b.com", "12345")] {
            assert!(matches!(svc.register(input).await, Err(AuthError::Validation(_))));
        }
        let mut blank_name = reg("a@b.com", "secret1");
        blank_name.name = " ".into();
        assert!(matches!(svc.register(blank_name).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_case_insensitively() {
        let svc = svc();
        let first = svc.register(reg("a@b.com", "secret1")).await.unwrap();
        let dup = svc.register(reg("A@B.COM ", "other-pass")).await;
        assert!(matches!(dup, Err(AuthError::Conflict)));

        // the original password still works
        let session = svc.login(login("a@b.com", "secret1")).await.unwrap();
        assert_eq!(session.user.id, first.id);
    }

    #[tokio::test]
    async fn login_distinguishes_unknown_user_from_bad_password() {
        let svc = svc();
        svc.register(reg("a@b.com", "secret1")).await.unwrap();

        assert!(matches!(svc.login(login("nobody@b.com", "secret1")).await, Err(AuthError::NotFound)));
        assert!(matches!(svc.login(login("a@b.com", "wrong")).await, Err(AuthError::Unauthorized)));
        assert!(matches!(svc.login(login("a@b.com", "")).await, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let svc = svc();
        let user = svc.register(reg("a@b.com", "secret1")).await.unwrap();
        let session = svc.login(login(" A@b.com", "secret1")).await.unwrap();
        let identity = svc.tokens().verify(&session.token).unwrap();
        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(svc.current_user(identity.user_id).await.unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn current_user_unknown_is_not_found() {
        assert!(matches!(svc().current_user(Uuid::new_v4()).await, Err(AuthError::NotFound)));
    }
}
