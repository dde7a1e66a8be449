use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::SynthesisError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> ChatMessage {
        ChatMessage {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> ChatMessage {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Prompt plus sampling settings, independent of any particular provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Something that turns a prompt into generated text.
///
/// Implementations return the assistant text verbatim, or `""` when the provider
/// answered successfully but carried no text.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, SynthesisError>;
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build completion http client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        log::info!("completion provider: {base_url} (model {model}, timeout {timeout:?})");

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
            model,
            timeout,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> SynthesisError {
        if e.is_timeout() {
            SynthesisError::UpstreamTimeout(self.timeout)
        } else {
            SynthesisError::Internal(anyhow::Error::new(e).context("Completion request failed"))
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, SynthesisError> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(SynthesisError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: Value =
            serde_json::from_str(&text).context("Completion response is not valid JSON")?;

        Ok(extract_content(&envelope).to_string())
    }
}

/// `choices[0].message.content`, or `""` if any step is missing or not a string.
pub fn extract_content(envelope: &Value) -> &str {
    envelope
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or("")
}
