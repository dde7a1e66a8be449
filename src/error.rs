use std::time::Duration;

/// Failure modes of a single synthesis.
///
/// Only `InvalidInput` is caused by the caller. Everything else is logged in
/// full and reported to the client as a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("query is required")]
    InvalidInput,

    #[error("completion provider returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("completion provider did not respond within {0:?}")]
    UpstreamTimeout(Duration),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SynthesisError {
    /// True for failures reported by (or waiting on) the completion provider.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SynthesisError::Upstream { .. } | SynthesisError::UpstreamTimeout(_)
        )
    }
}
