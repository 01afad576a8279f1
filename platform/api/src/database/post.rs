use chrono::{DateTime, Utc};

/// A post decorated with its author, one entry of a feed. The feed only
/// reads posts, writing them is owned by another service.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Post {
    /// The unique identifier for the post.
    pub id: i64,
    /// The author of the post.
    pub user_id: i64,
    /// The text content of the post.
    pub content: String,
    /// An optional media attachment.
    pub media_url: Option<String>,
    /// The time the post was created.
    pub created_at: DateTime<Utc>,
    /// The username of the author.
    pub username: String,
    /// The display name of the author.
    pub display_name: String,
}
