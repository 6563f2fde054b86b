//! Database entities.

#![allow(missing_docs)]

pub mod comment;
pub mod follow;
pub mod log;
pub mod log_like;
pub mod log_tag;
pub mod post;
pub mod post_like;
pub mod report;
pub mod tag;
pub mod user;
pub mod user_interest;

pub use comment::Entity as Comment;
pub use follow::Entity as Follow;
pub use log::Entity as Log;
pub use log_like::Entity as LogLike;
pub use log_tag::Entity as LogTag;
pub use post::Entity as Post;
pub use post_like::Entity as PostLike;
pub use report::Entity as Report;
pub use tag::Entity as Tag;
pub use user::Entity as User;
pub use user_interest::Entity as UserInterest;
