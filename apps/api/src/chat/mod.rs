//! Chat proxy: forwards recruiter questions to the candidate-suggestion workflow.
//!
//! The workflow is an external automation webhook. It answers either with JSON
//! (`{"result": {"text": "..."}}`) or with a plain-text body, and the reply text is
//! whatever ends up under `result.text`.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;

const WEBHOOK_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backend that turns a chat message into suggested candidates.
///
/// Carried in `AppState` as `Arc<dyn CandidateSuggester>`.
#[async_trait]
pub trait CandidateSuggester: Send + Sync {
    /// Returns the reply text, or `None` when the backend answered without one.
    async fn suggest(&self, payload: &Value) -> Result<Option<String>, WebhookError>;
}

/// Pulls `result.text` out of a webhook response, if it is a string.
pub fn extract_reply(data: &Value) -> Option<String> {
    data.get("result")
        .and_then(|r| r.get("text"))
        .and_then(Value::as_str)
        .map(String::from)
}

/// Normalizes a webhook body: JSON bodies are parsed, anything else is wrapped as
/// `{"result": {"text": body}}`.
pub fn parse_webhook_body(content_type: &str, body: &str) -> Result<Value, WebhookError> {
    if content_type.contains("application/json") {
        Ok(serde_json::from_str(body)?)
    } else {
        Ok(json!({ "result": { "text": body } }))
    }
}

/// reqwest-backed client for the workflow webhook.
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: String) -> Result<Self, WebhookError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
                .build()?,
            url,
        })
    }
}

#[async_trait]
impl CandidateSuggester for WebhookClient {
    async fn suggest(&self, payload: &Value) -> Result<Option<String>, WebhookError> {
        let response = self.client.post(&self.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Webhook returned {}: {}", status, body);
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;
        debug!("Webhook replied with {} bytes ({content_type})", body.len());

        let data = parse_webhook_body(&content_type, &body)?;
        Ok(extract_reply(&data))
    }
}
