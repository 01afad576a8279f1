use crate::database::{user, Follow};

use super::{FollowGraph, GraphError};

impl FollowGraph {
    /// Creates a follow edge from `follower_id` to `following_id`.
    ///
    /// Fails with [`GraphError::SelfFollow`] when the two ids are equal,
    /// [`GraphError::TargetNotFound`] when the target does not resolve to
    /// an active account, and [`GraphError::DuplicateEdge`] when the edge
    /// already exists. Of two concurrent identical creates exactly one
    /// commits, the other observes [`GraphError::DuplicateEdge`].
    pub async fn follow(&self, follower_id: i64, following_id: i64) -> Result<Follow, GraphError> {
        if follower_id == following_id {
            return Err(GraphError::SelfFollow);
        }

        if !user::is_active(self.db(), following_id).await? {
            return Err(GraphError::TargetNotFound);
        }

        // The insert re-checks the target and the uniqueness constraint in
        // one statement, so the validation above can never race another
        // writer into a bad edge.
        let edge: Option<Follow> = sqlx::query_as(
            "INSERT INTO follows (follower_id, following_id) \
             SELECT $1, $2 WHERE EXISTS (SELECT 1 FROM users WHERE id = $2 AND is_deleted = FALSE) \
             ON CONFLICT (follower_id, following_id) DO NOTHING \
             RETURNING id, follower_id, following_id, created_at",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(self.db())
        .await?;

        match edge {
            Some(edge) => {
                tracing::debug!(follower_id, following_id, "follow edge created");
                Ok(edge)
            }
            None => {
                // The insert lost a race: either the edge already exists,
                // or the target was deleted between the check and the
                // insert. Look at the target once more to tell the two
                // apart.
                if user::is_active(self.db(), following_id).await? {
                    Err(GraphError::DuplicateEdge)
                } else {
                    Err(GraphError::TargetNotFound)
                }
            }
        }
    }

    /// Removes the follow edge from `follower_id` to `following_id`.
    ///
    /// The edge is hard-deleted. Fails with [`GraphError::EdgeNotFound`]
    /// when there is no such edge, leaving the store untouched.
    pub async fn unfollow(&self, follower_id: i64, following_id: i64) -> Result<(), GraphError> {
        let deleted = sqlx::query(
            "DELETE FROM follows WHERE follower_id = $1 AND following_id = $2 RETURNING id",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(self.db())
        .await?;

        if deleted.is_none() {
            return Err(GraphError::EdgeNotFound);
        }

        tracing::debug!(follower_id, following_id, "follow edge removed");

        Ok(())
    }
}
