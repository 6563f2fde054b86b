//! HTTP API layer for lumbr.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: logs, posts, comments, follows, tags, reports,
//!   admin moderation and search
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: auth lookup populating request extensions
//!
//! Built on Axum 0.8 with the Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
