//! Anthropic Messages API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{mask_token, LlmClient, LlmError, Role, Turn, DEFAULT_SYSTEM_PROMPT};

/// Value of the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const KEY_PREFIX: &str = "sk-ant-";

/// [`LlmClient`] backed by `POST {base_url}/messages`.
#[derive(Clone)]
pub struct AnthropicLlmClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    system_prompt: Option<String>,
}

impl AnthropicLlmClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            system_prompt: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn system_content(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    fn endpoint(&self) -> String {
        format!("{}/messages", self.base_url.trim_end_matches('/'))
    }
}

impl Default for AnthropicLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    temperature: f32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Converts turns to API messages. The API requires the first message to come from the user,
/// so leading assistant turns (left over after window eviction) are dropped.
fn to_api_messages(turns: &[Turn]) -> Vec<ApiMessage<'_>> {
    turns
        .iter()
        .skip_while(|t| t.role == Role::Assistant)
        .map(|t| ApiMessage {
            role: t.role.as_str(),
            content: &t.text,
        })
        .collect()
}

/// Maps a non-success HTTP status and body to an [`LlmError`].
pub(crate) fn classify_status(status: u16, body: &str) -> LlmError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
    let (error_type, message) = match &detail {
        Some(d) => (d.error_type.as_str(), d.message.as_str()),
        None => ("", body),
    };
    let lowered = message.to_lowercase();

    if matches!(status, 401 | 403)
        || matches!(error_type, "authentication_error" | "permission_error")
    {
        LlmError::InvalidKey
    } else if status == 429
        || error_type == "rate_limit_error"
        || lowered.contains("credit balance")
        || lowered.contains("quota")
    {
        LlmError::QuotaExceeded
    } else {
        LlmError::Transport(format!("HTTP {}: {}", status, message.trim()))
    }
}

fn classify_reqwest(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Transport(e.to_string())
    }
}

#[async_trait]
impl LlmClient for AnthropicLlmClient {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn key_prefix(&self) -> &str {
        KEY_PREFIX
    }

    #[instrument(skip(self, api_key, turns), fields(model = %self.model, turns = turns.len()))]
    async fn complete(&self, api_key: &str, turns: &[Turn]) -> Result<String, LlmError> {
        let messages = to_api_messages(turns);
        if messages.is_empty() {
            return Err(LlmError::Transport("no user turn to send".to_string()));
        }

        info!(
            api_key = %mask_token(api_key),
            message_count = messages.len(),
            "Anthropic messages request"
        );

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: self.system_content(),
            temperature: self.temperature,
            messages,
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(classify_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_status(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "Anthropic request failed");
            return Err(err);
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("invalid response body: {}", e)))?;

        if let Some(u) = &parsed.usage {
            info!(
                input_tokens = u.input_tokens,
                output_tokens = u.output_tokens,
                "Anthropic messages usage"
            );
        }

        let text: String = parsed
            .content
            .into_iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text)
            .collect();
        Ok(text)
    }
}
