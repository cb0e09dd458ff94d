//! Application state and routing

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::cache::Cache;
use crate::handlers;
use crate::tasks::TaskDispatcher;

/// Shared application context passed to all handlers.
///
/// Clones are cheap: the pool and cache are handles, the dispatcher is a
/// channel sender.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub cache: Cache,
    pub tasks: TaskDispatcher,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let cache = Cache::new();
        let tasks = TaskDispatcher::spawn(pool.clone(), cache.clone());
        AppState { pool, cache, tasks }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Conference routes
        .route("/conferences", post(handlers::create_conference))
        .route("/conferences/query", post(handlers::query_conferences))
        .route("/conferences/created", get(handlers::get_conferences_created))
        .route("/conferences/attending", get(handlers::get_conferences_to_attend))
        .route(
            "/conferences/{id}",
            get(handlers::get_conference).put(handlers::update_conference),
        )
        // Registration routes
        .route(
            "/conferences/{id}/registration",
            post(handlers::register_for_conference).delete(handlers::unregister_from_conference),
        )
        // Session routes
        .route(
            "/conferences/{id}/sessions",
            get(handlers::get_conference_sessions).post(handlers::create_session),
        )
        .route(
            "/conferences/{id}/sessions/type/{type}",
            get(handlers::get_conference_sessions_by_type),
        )
        .route(
            "/conferences/{id}/featured-speaker",
            get(handlers::get_featured_speaker),
        )
        .route("/sessions", get(handlers::query_sessions))
        .route(
            "/sessions/speaker/{speaker}",
            get(handlers::get_sessions_by_speaker),
        )
        // Wishlist routes
        .route(
            "/sessions/{id}/wishlist",
            post(handlers::add_session_to_wishlist).delete(handlers::delete_session_in_wishlist),
        )
        .route("/wishlist", get(handlers::get_sessions_in_wishlist))
        // Profile routes
        .route(
            "/profile",
            get(handlers::get_profile).post(handlers::save_profile),
        )
        // Announcements
        .route("/announcement", get(handlers::get_announcement))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
