use common::context::Context;

use crate::config::AppConfig;
use crate::feed::FeedComposer;
use crate::graph::FollowGraph;

pub struct GlobalState {
    pub config: AppConfig,
    pub db: sqlx::PgPool,
    pub ctx: Context,
    pub graph: FollowGraph,
    pub feed: FeedComposer,
}

impl GlobalState {
    /// Every component gets its own handle on the pool at construction,
    /// nothing reaches for a shared connection at call time.
    pub fn new(config: AppConfig, db: sqlx::PgPool, ctx: Context) -> Self {
        let graph = FollowGraph::new(db.clone());
        let feed = FeedComposer::new(db.clone());

        Self {
            config,
            db,
            ctx,
            graph,
            feed,
        }
    }
}
