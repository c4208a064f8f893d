//! Postgres access: schema bootstrap and the user repository.

pub mod models;
pub mod users;

use anyhow::{Context, Result};
use sqlx::PgPool;

/// Bootstrap DDL, applied idempotently at startup. The UNIQUE constraints
/// carry the duplicate-name/email invariant; their names are matched when
/// mapping unique-violation errors.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            UUID PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT users_name_key  UNIQUE (name),
    CONSTRAINT users_email_key UNIQUE (email)
)
"#;

/// Create the `users` table (with its uniqueness constraints) if missing.
pub async fn init_schema(db: &PgPool) -> Result<()> {
    sqlx::query(SCHEMA)
        .execute(db)
        .await
        .context("creating users table")?;
    Ok(())
}
