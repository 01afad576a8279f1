//! The follow graph: the edge store and the read operations over it.
//!
//! Mutations live in [`mutations`], reads in [`queries`]. Everything goes
//! through [`FollowGraph`], which owns its handle on the pool.

mod mutations;
mod queries;

/// The default page size for list operations when the caller does not ask
/// for one.
pub const DEFAULT_LIMIT: i64 = 20;

/// The hard cap on page size. Larger limits are clamped, not rejected.
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("users cannot follow themselves")]
    SelfFollow,
    #[error("user to follow not found")]
    TargetNotFound,
    #[error("already following this user")]
    DuplicateEdge,
    #[error("follow relationship not found")]
    EdgeNotFound,
    #[error("limit and offset must not be negative")]
    InvalidPagination,
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl GraphError {
    /// A stable machine-readable code, part of the API contract. Callers
    /// branch on these, never on the human-readable messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SelfFollow => "self_follow",
            Self::TargetNotFound => "target_not_found",
            Self::DuplicateEdge => "duplicate_edge",
            Self::EdgeNotFound => "edge_not_found",
            Self::InvalidPagination => "invalid_pagination",
            Self::Store(_) => "store_unavailable",
        }
    }
}

/// A validated limit/offset pair. An offset past the end of a result set
/// yields an empty page, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Result<Self, GraphError> {
        if limit < 0 || offset < 0 {
            return Err(GraphError::InvalidPagination);
        }

        Ok(Self {
            limit: limit.min(MAX_LIMIT),
            offset,
        })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// The follow relationship store.
///
/// All invariants (no self-follows, no duplicate edges) are enforced by
/// the store in the same transaction as the write, so concurrent callers
/// cannot race a check against an insert.
#[derive(Clone)]
pub struct FollowGraph {
    db: sqlx::PgPool,
}

impl FollowGraph {
    pub fn new(db: sqlx::PgPool) -> Self {
        Self { db }
    }

    pub(crate) fn db(&self) -> &sqlx::PgPool {
        &self.db
    }
}
