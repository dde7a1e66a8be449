use std::sync::Arc;

use crate::data_models::ResultList;
use crate::error::SynthesisError;
use crate::parser;
use crate::provider::{ChatMessage, CompletionProvider, CompletionRequest};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that returns a JSON array of up to 10 search results. Each result must be an object with keys: url, title, description. Return only valid JSON (no explanation).";

/// Asks a completion provider to make up search results and coerces whatever
/// comes back into a [`ResultList`].
pub struct ResultSynthesizer {
    provider: Arc<dyn CompletionProvider>,
}

impl ResultSynthesizer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// The exact request sent for `query`. Deterministic for a given query.
    pub fn build_request(query: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(format!("Search the web and return results for: \"{query}\"")),
            ],
            temperature: 0.0,
        }
    }

    pub async fn synthesize(&self, query: &str) -> Result<ResultList, SynthesisError> {
        if query.is_empty() {
            return Err(SynthesisError::InvalidInput);
        }

        let request = Self::build_request(query);
        let raw = self.provider.complete(&request).await?;

        let results = parser::parse_results(&raw);
        if results.is_empty() && !raw.is_empty() {
            log::info!("no results recovered from {} bytes of model output", raw.len());
        }
        Ok(results)
    }
}
