use chrono::{DateTime, Utc};

/// A directed follow edge. Unlike posts these are hard-deleted on
/// unfollow, a re-follow creates a fresh edge with a new timestamp.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct Follow {
    /// The unique identifier for the edge.
    pub id: i64,
    /// The user doing the following.
    pub follower_id: i64,
    /// The user being followed.
    pub following_id: i64,
    /// The time the edge was created.
    pub created_at: DateTime<Utc>,
}

/// An account decorated with the time the relevant edge was created, one
/// row of a following/followers listing.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct FollowUser {
    /// The unique identifier for the user.
    pub id: i64,
    /// The username of the user.
    pub username: String,
    /// The display name of the user.
    pub display_name: String,
    /// The time the edge was created.
    pub followed_at: DateTime<Utc>,
}

/// Aggregate edge counts for one account. Derived on demand from the edge
/// set, never stored.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, sqlx::FromRow)]
pub struct FollowStats {
    /// How many accounts the user follows.
    pub following_count: i64,
    /// How many accounts follow the user.
    pub follower_count: i64,
}
