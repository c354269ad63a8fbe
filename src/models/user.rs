use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A registered account as stored in the `users` table.
///
/// The password hash never leaves the store layer in a response body.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Inserts a new `(username, password_hash)` pair.
    ///
    /// A duplicate username surfaces as the store's uniqueness-violation error,
    /// which the caller maps to a conflict.
    pub async fn insert(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
            .bind(username)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Looks up a user by username, returning `None` when no row matches.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}
