use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{AuthUser, SessionUser};
use super::errors::AuthError;

/// JWT payload. Field names are part of the cookie format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 signer/verifier for session tokens.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    pub fn issue(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            iat: now as usize,
            exp: (now + self.ttl_secs) as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Signature, expiry and a UUID `userId` are all required.
    pub fn verify(&self, token: &str) -> Result<SessionUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        let user_id = Uuid::parse_str(&data.claims.user_id)
            .map_err(|_| AuthError::TokenError("userId claim is not a uuid".into()))?;
        Ok(SessionUser { user_id, email: data.claims.email })
    }
}
