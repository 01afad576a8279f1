use crate::database::{FollowStats, FollowUser};

use super::{FollowGraph, GraphError, Page};

impl FollowGraph {
    /// Whether an edge from `follower_id` to `following_id` currently
    /// exists. Point-in-time snapshot, no side effects.
    pub async fn is_following(
        &self,
        follower_id: i64,
        following_id: i64,
    ) -> Result<bool, GraphError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM follows WHERE follower_id = $1 AND following_id = $2",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(self.db())
        .await?;

        Ok(row.is_some())
    }

    /// The accounts `user_id` follows, most recently followed first.
    /// Soft-deleted accounts are filtered out, their edges stay in place.
    pub async fn following(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<FollowUser>, GraphError> {
        let users = sqlx::query_as(
            "SELECT u.id, u.username, u.display_name, f.created_at AS followed_at \
             FROM follows f \
             INNER JOIN users u ON u.id = f.following_id \
             WHERE f.follower_id = $1 AND u.is_deleted = FALSE \
             ORDER BY f.created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.db())
        .await?;

        Ok(users)
    }

    /// The accounts following `user_id`, most recent follower first.
    pub async fn followers(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<FollowUser>, GraphError> {
        let users = sqlx::query_as(
            "SELECT u.id, u.username, u.display_name, f.created_at AS followed_at \
             FROM follows f \
             INNER JOIN users u ON u.id = f.follower_id \
             WHERE f.following_id = $1 AND u.is_deleted = FALSE \
             ORDER BY f.created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.db())
        .await?;

        Ok(users)
    }

    /// Edge counts for `user_id`, computed over the raw edge set.
    ///
    /// Unlike the list operations this does not filter by account state,
    /// edges onto soft-deleted accounts still count. Matches the observed
    /// behavior of the system this one replaces, see DESIGN.md.
    pub async fn stats(&self, user_id: i64) -> Result<FollowStats, GraphError> {
        let stats = sqlx::query_as(
            "SELECT \
             (SELECT COUNT(*) FROM follows WHERE follower_id = $1) AS following_count, \
             (SELECT COUNT(*) FROM follows WHERE following_id = $1) AS follower_count",
        )
        .bind(user_id)
        .fetch_one(self.db())
        .await?;

        Ok(stats)
    }
}
