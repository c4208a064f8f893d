//! Registration and login, both answering with a fresh JWT.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::Crypto;
use crate::db::users;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub jwt: String,
}

#[post("/registrar")]
pub async fn registrar(
    info: web::Json<RegisterRequest>,
    db: web::Data<PgPool>,
    crypto: web::Data<Crypto>,
) -> Result<HttpResponse, ApiError> {
    let user = users::register(db.get_ref(), &info.name, &info.email, &info.password).await?;
    let jwt = crypto.issue(&user.email)?;
    Ok(HttpResponse::Ok().json(TokenResponse { jwt }))
}

#[post("/login")]
pub async fn login(
    info: web::Json<LoginRequest>,
    db: web::Data<PgPool>,
    crypto: web::Data<Crypto>,
) -> Result<HttpResponse, ApiError> {
    let user = users::verify(db.get_ref(), &info.email, &info.password).await?;
    let jwt = crypto.issue(&user.email)?;
    Ok(HttpResponse::Ok().json(TokenResponse { jwt }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registrar).service(login);
}
