//! JWT issuance/validation and password hashing.

pub mod password;

mod extractor;
pub use extractor::AuthUser;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;

use crate::config::settings;
use crate::error::ApiError;

/// JWT payload: the holder's email plus expiry, nothing else.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // email
    pub exp: usize,
}

impl Claims {
    /// Claims for `email`, expiring `ttl_secs` from now.
    pub fn new(email: &str, ttl_secs: u64) -> Self {
        let exp = (Utc::now() + Duration::seconds(ttl_secs as i64)).timestamp() as usize;
        Self {
            sub: email.to_owned(),
            exp,
        }
    }
}

/// HS256 signing/verification keys for the configured secret.
#[derive(Clone)]
pub struct Crypto {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        Self::new(secret.as_bytes())
    }

    /// Issue a token for `email` using the configured lifetime.
    pub fn issue(&self, email: &str) -> Result<String, ApiError> {
        self.sign(&Claims::new(email, settings().token_ttl))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, ApiError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("jwt encode: {e}")))
    }

    /// Verify signature and expiry; the two failure modes map to distinct
    /// 403 errors.
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::TokenExpired,
                _ => ApiError::TokenInvalid,
            })
    }
}
