//! Lumbr server entry point.

mod sweep;

use std::sync::Arc;

use axum::{Router, middleware};
use lumbr_api::{middleware::AppState, router as api_router};
use lumbr_common::Config;
use lumbr_core::{
    CommentService, FollowService, LikeService, LogService, ModerationService, PostService,
    TagService, UserService,
};
use lumbr_db::repositories::{
    CommentRepository, FollowRepository, LikeRepository, LogRepository, PostRepository,
    ReportRepository, TagRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumbr=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting lumbr server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = lumbr_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    lumbr_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let log_repo = LogRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let like_repo = LikeRepository::new(Arc::clone(&db));
    let follow_repo = FollowRepository::new(Arc::clone(&db));
    let tag_repo = TagRepository::new(Arc::clone(&db));
    let report_repo = ReportRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo.clone());
    let log_service = LogService::new(log_repo.clone(), user_repo.clone(), tag_repo.clone());
    let post_service = PostService::new(post_repo.clone(), log_repo.clone(), user_repo.clone());
    let comment_service = CommentService::new(
        comment_repo,
        log_repo.clone(),
        post_repo.clone(),
        user_repo.clone(),
    );
    let like_service = LikeService::new(like_repo, log_repo.clone(), post_repo);
    let follow_service = FollowService::new(follow_repo, user_repo.clone());
    let tag_service = TagService::new(tag_repo, log_repo.clone(), user_repo.clone());
    let moderation_service = ModerationService::new(report_repo, user_repo, log_repo);

    // Start the background suspension sweep
    if config.sweep.enabled {
        sweep::spawn(moderation_service.clone(), config.sweep.clone());
        info!(
            interval_secs = config.sweep.interval_secs,
            "Suspension sweep task started"
        );
    }

    // Create app state
    let state = AppState {
        user_service,
        log_service,
        post_service,
        comment_service,
        like_service,
        follow_service,
        tag_service,
        moderation_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            lumbr_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
