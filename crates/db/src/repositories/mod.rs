//! Database repositories.

#![allow(missing_docs)]

pub mod comment;
pub mod follow;
pub mod like;
pub mod log;
pub mod post;
pub mod report;
pub mod tag;
pub mod user;

pub use comment::CommentRepository;
pub use follow::FollowRepository;
pub use like::LikeRepository;
pub use log::LogRepository;
pub use post::PostRepository;
pub use report::ReportRepository;
pub use tag::TagRepository;
pub use user::UserRepository;
