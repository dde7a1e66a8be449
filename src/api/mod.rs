use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::synthesizer::ResultSynthesizer;

pub mod handlers;
pub mod models;

pub fn create_router(synthesizer: Arc<ResultSynthesizer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", post(handlers::search_handler))
        .with_state(synthesizer)
        .layer(cors)
}
