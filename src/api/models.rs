use serde::Serialize;
use serde_json::Value;

use crate::data_models::ResultList;
use crate::parser::present_text;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
}

impl SearchRequest {
    /// Reads `query` from any JSON body. Non-objects, and a `query` that is null,
    /// `false`, `0` or `""`, leave it unset. Other scalars are taken as text.
    pub fn from_json(body: &Value) -> SearchRequest {
        SearchRequest {
            query: body.get("query").and_then(present_text),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: ResultList,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[test]
fn test_search_request_from_json() {
    use serde_json::json;

    let query = |body: Value| SearchRequest::from_json(&body).query;
    assert_eq!(query(json!({"query": "rust"})), Some("rust".to_string()));
    assert_eq!(query(json!({"query": 42})), Some("42".to_string()));
    assert_eq!(query(json!({"query": ""})), None);
    assert_eq!(query(json!({"query": false})), None);
    assert_eq!(query(json!({"query": 0})), None);
    assert_eq!(query(json!({"query": null})), None);
    assert_eq!(query(json!({})), None);
    assert_eq!(query(json!([])), None);
    assert_eq!(query(json!("just a string")), None);
}
