pub mod error;
pub mod handlers;
pub mod parse_request;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use syllabus_parser::SyllabusService;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub syllabus_service: Arc<SyllabusService>,
}

pub fn app(syllabus_service: Arc<SyllabusService>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/parse-syllabus", post(handlers::parse_syllabus))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .with_state(AppState { syllabus_service })
}
