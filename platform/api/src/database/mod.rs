pub mod follow;
pub mod post;
pub mod user;

pub use follow::{Follow, FollowStats, FollowUser};
pub use post::Post;
pub use user::User;
