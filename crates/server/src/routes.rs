use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use service::BlogApi;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod blog;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub blog_api: Arc<dyn BlogApi>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health plus the blog CRUD routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/blogposts", get(blog::list_blog_posts).put(blog::save_blog_post))
        .route("/api/blogposts/count", get(blog::blog_post_count))
        .route("/api/blogposts/:id", get(blog::get_blog_post).delete(blog::delete_blog_post))
        .route("/api/categories", get(blog::list_categories).put(blog::save_category))
        .route("/api/categories/:id", get(blog::get_category).delete(blog::delete_category))
        .route("/api/tags", get(blog::list_tags).put(blog::save_tag))
        .route("/api/tags/:id", get(blog::get_tag).delete(blog::delete_tag))
        .route("/api/cache/invalidate", post(blog::invalidate_cache));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
