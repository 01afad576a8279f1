use chrono::{DateTime, Utc};

/// The slice of an account the social graph cares about. Account
/// lifecycle (registration, login, deletion) is owned by another service.
#[derive(Debug, Clone, Default, serde::Serialize, sqlx::FromRow)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The username of the user.
    pub username: String,
    /// The display name of the user.
    pub display_name: String,
    /// The time the user was created.
    pub created_at: DateTime<Utc>,
}

/// Fetches an active user by id. Soft-deleted accounts read as absent.
pub async fn by_id(db: &sqlx::PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, username, display_name, created_at FROM users WHERE id = $1 AND is_deleted = FALSE",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Returns true when the account exists and has not been soft-deleted.
pub async fn is_active(db: &sqlx::PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM users WHERE id = $1 AND is_deleted = FALSE")
            .bind(user_id)
            .fetch_optional(db)
            .await?;

    Ok(row.is_some())
}
