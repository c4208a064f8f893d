//! Client-facing error taxonomy.
//!
//! Detail strings follow the upstream API wording: duplicate/credential
//! errors in Portuguese, bearer-scheme failures in English.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Email já registrado")]
    DuplicateEmail,
    #[error("Nome indisponível")]
    DuplicateName,
    #[error("Credenciais inválidas")]
    InvalidCredentials,
    #[error("Not authenticated")]
    TokenMissing,
    #[error("Invalid authentication credentials")]
    InvalidAuthScheme,
    #[error("Token expirado.")]
    TokenExpired,
    #[error("Token inválido.")]
    TokenInvalid,

    // infra things
    #[error(transparent)]
    Database(sqlx::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::from_db(e)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl ApiError {
    /// Unique-violation races that slip past the pre-insert checks still
    /// surface as the right duplicate error, keyed by constraint name.
    fn from_db(err: sqlx::Error) -> Self {
        match err.as_database_error().and_then(|d| d.constraint()) {
            Some("users_email_key") => ApiError::DuplicateEmail,
            Some("users_name_key") => ApiError::DuplicateName,
            _ => ApiError::Database(err),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateEmail | Self::DuplicateName => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::TokenMissing | Self::InvalidAuthScheme | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::FORBIDDEN
            }
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            Self::Database(_) | Self::Internal(_) => "Internal Server Error".to_owned(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { detail: &detail })
    }
}
