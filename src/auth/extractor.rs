//! Bearer-JWT request guard.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest, Result as ActixResult};
use futures_util::future::{ready, Ready};

use crate::auth::Crypto;
use crate::error::ApiError;

/// Extracts and validates a Bearer JWT, exposing the caller's email.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<ActixResult<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
        let res = (|| {
            // Expect:  Authorization: Bearer <JWT>
            let hdr = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::TokenMissing)?;

            // A header without a credentials part reads as absent; a wrong
            // scheme is its own error. Scheme matching is case-insensitive.
            let (scheme, token) = hdr.split_once(' ').unwrap_or((hdr, ""));
            if token.is_empty() {
                return Err(ApiError::TokenMissing);
            }
            if !scheme.eq_ignore_ascii_case("bearer") {
                return Err(ApiError::InvalidAuthScheme);
            }

            let crypto = req
                .app_data::<web::Data<Crypto>>()
                .ok_or_else(|| ApiError::Internal("token keys not configured".into()))?;

            let claims = crypto.validate(token)?;

            Ok(AuthUser { email: claims.sub })
        })();

        ready(res)
    }
}
