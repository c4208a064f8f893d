//! User repository: registration and credential checks.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::db::models::User;
use crate::error::ApiError;

/// Insert a new user with a freshly hashed password.
///
/// Duplicate email is reported before duplicate name. The UNIQUE constraints
/// back both checks up when two registrations race past them.
pub async fn register(db: &PgPool, name: &str, email: &str, pass: &str) -> Result<User, ApiError> {
    if email_taken(db, email).await? {
        return Err(ApiError::DuplicateEmail);
    }
    if name_taken(db, name).await? {
        return Err(ApiError::DuplicateName);
    }

    let hash =
        password::hash(pass).map_err(|e| ApiError::Internal(format!("password hash: {e}")))?;

    let user = sqlx::query_as::<_, User>(
        r#"INSERT INTO users (id, name, email, password_hash)
           VALUES ($1, $2, $3, $4)
           RETURNING id, name, email, password_hash, created_at"#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(hash)
    .fetch_one(db)
    .await?;

    Ok(user)
}

pub async fn email_taken(db: &PgPool, email: &str) -> Result<bool, ApiError> {
    let taken =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(db)
            .await?;
    Ok(taken)
}

pub async fn name_taken(db: &PgPool, name: &str) -> Result<bool, ApiError> {
    let taken = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE name = $1)")
        .bind(name)
        .fetch_one(db)
        .await?;
    Ok(taken)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

/// Check credentials. Unknown email and wrong password are indistinguishable
/// to the caller.
pub async fn verify(db: &PgPool, email: &str, pass: &str) -> Result<User, ApiError> {
    let user = find_by_email(db, email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify(pass, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }
    Ok(user)
}
