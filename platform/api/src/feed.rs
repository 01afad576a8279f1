//! Derives the personalized feed: the merged, time-ordered view of posts
//! from an account and everyone it follows.

use crate::database::Post;
use crate::graph::{GraphError, Page};

#[derive(Clone)]
pub struct FeedComposer {
    db: sqlx::PgPool,
}

impl FeedComposer {
    pub fn new(db: sqlx::PgPool) -> Self {
        Self { db }
    }

    /// The feed for `user_id`: non-deleted posts authored by the user or
    /// by any account the user currently follows, newest first, paginated
    /// over the merged set.
    ///
    /// The user's own posts are always included, even when they follow no
    /// one. The following set is resolved inside the query itself, so a
    /// concurrently committed follow/unfollow may or may not be visible,
    /// read-committed is all that is promised.
    pub async fn feed_for(&self, user_id: i64, page: Page) -> Result<Vec<Post>, GraphError> {
        let posts = sqlx::query_as(
            "SELECT p.id, p.user_id, p.content, p.media_url, p.created_at, u.username, u.display_name \
             FROM posts p \
             INNER JOIN users u ON u.id = p.user_id \
             WHERE (p.user_id = $1 OR p.user_id IN (SELECT following_id FROM follows WHERE follower_id = $1)) \
             AND p.is_deleted = FALSE \
             ORDER BY p.created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }
}
