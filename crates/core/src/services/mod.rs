//! Business logic services.

#![allow(missing_docs)]

pub mod comment;
pub mod follow;
pub mod like;
pub mod log;
pub mod moderation;
pub mod post;
pub mod tags;
pub mod user;

pub use comment::{CommentService, CreateCommentInput};
pub use follow::FollowService;
pub use like::LikeService;
pub use log::{CreateLogInput, LogService};
pub use moderation::{CreateReportInput, ModerationService, SuspendUserInput};
pub use post::{CreatePostInput, PostService};
pub use tags::{LOG_TAG_LIMIT, TagDiff, TagService};
pub use user::{UpdateProfileInput, UserService};
