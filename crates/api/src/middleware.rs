//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use lumbr_core::{
    CommentService, FollowService, LikeService, LogService, ModerationService, PostService,
    TagService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub log_service: LogService,
    pub post_service: PostService,
    pub comment_service: CommentService,
    pub like_service: LikeService,
    pub follow_service: FollowService,
    pub tag_service: TagService,
    pub moderation_service: ModerationService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to a user and stashes it in the request
/// extensions. Requests without a valid token proceed anonymously;
/// handlers that need a user reject them through [`crate::extractors::AuthUser`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.user_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
