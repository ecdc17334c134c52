use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::{pagination::{Direction, PageRequest}, types::Health};
use service::blog::SeaOrmBlogService;

pub mod comments;
pub mod posts;

#[derive(Clone)]
pub struct ServerState {
    pub blog: Arc<SeaOrmBlogService>,
}

impl ServerState {
    pub fn new(blog: SeaOrmBlogService) -> Self { Self { blog: Arc::new(blog) } }
}

/// `?page=&size=&direction=`; missing values fall back to `PageRequest::default()`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub direction: Option<Direction>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        let d = PageRequest::default();
        PageRequest::new(self.page.unwrap_or(d.page), self.size.unwrap_or(d.size))
            .with_direction(self.direction.unwrap_or(d.direction))
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/posts", get(posts::search).post(posts::create))
        .route("/api/posts/:id", get(posts::get).put(posts::update).delete(posts::delete))
        .route("/api/posts/:id/comments", get(comments::list).post(comments::create))
        .route("/api/comments/:id", delete(comments::delete));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
