//! API endpoints.

mod admin;
mod comments;
mod follows;
mod logs;
mod posts;
mod reports;
mod search;
mod tags;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/logs", logs::router())
        .nest("/posts", posts::router())
        .nest("/comments", comments::router())
        .nest("/follows", follows::router())
        .nest("/tags", tags::router())
        .nest("/reports", reports::router())
        .nest("/admin", admin::router())
        .nest("/search", search::router())
}
