use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::error::SynthesisError;
use crate::synthesizer::ResultSynthesizer;

use super::models::{ErrorResponse, SearchRequest, SearchResponse};

pub const QUERY_REQUIRED: &str = "Query is required";
pub const SEARCH_FAILED: &str = "Failed to perform search";

type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn search_handler(
    State(synthesizer): State<Arc<ResultSynthesizer>>,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = Instant::now();

    // Content-Type is not checked, any body that parses as JSON is accepted.
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        log::error!("Search error: request body is not JSON: {e}");
        search_failed()
    })?;
    let request = SearchRequest::from_json(&body);

    let query = request.query.unwrap_or_default();
    let results = synthesizer.synthesize(&query).await.map_err(into_api_error)?;

    log::info!(
        "search returned {} results in {}ms",
        results.len(),
        start.elapsed().as_millis()
    );

    Ok(Json(SearchResponse { results }))
}

/// Only the status code tells client errors from server errors. Details stay in the log.
fn into_api_error(e: SynthesisError) -> ApiError {
    match e {
        SynthesisError::InvalidInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(QUERY_REQUIRED)),
        ),
        SynthesisError::Upstream { status, body } => {
            log::error!("Completion provider error: {status} {body}");
            search_failed()
        }
        other => {
            log::error!("Search error: {:#}", other);
            search_failed()
        }
    }
}

fn search_failed() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(SEARCH_FAILED)),
    )
}
