//! OpenAI-compatible LlmClient built on async-openai; the system message is prepended to every request.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::{mask_token, LlmClient, LlmError, Role, Turn, DEFAULT_SYSTEM_PROMPT};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const KEY_PREFIX: &str = "sk-";

/// [`LlmClient`] for OpenAI chat completions. A fresh async-openai client is configured per call
/// because each session authenticates with its own key.
#[derive(Clone)]
pub struct OpenAILlmClient {
    base_url: String,
    model: String,
    max_tokens: u32,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: 4096,
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

    fn system_content(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    fn build_messages(&self, turns: &[Turn]) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_content().to_string())
                .build()?
                .into(),
        ];
        for turn in turns {
            let msg: ChatCompletionRequestMessage = match turn.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.text.clone())
                    .build()?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.text.clone())
                    .build()?
                    .into(),
            };
            messages.push(msg);
        }
        Ok(messages)
    }
}

impl Default for OpenAILlmClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an async-openai error to an [`LlmError`] using the API error code, type and message.
pub(crate) fn classify_openai_error(err: OpenAIError) -> LlmError {
    match err {
        OpenAIError::ApiError(api) => {
            let haystack = format!("{:?} {:?} {}", api.code, api.r#type, api.message).to_lowercase();
            classify_api_text(&haystack)
        }
        OpenAIError::Reqwest(e) if e.is_timeout() => LlmError::Timeout,
        other => LlmError::Transport(other.to_string()),
    }
}

fn classify_api_text(haystack: &str) -> LlmError {
    if haystack.contains("invalid_api_key") || haystack.contains("incorrect api key") {
        LlmError::InvalidKey
    } else if haystack.contains("insufficient_quota")
        || haystack.contains("rate_limit")
        || haystack.contains("quota")
    {
        LlmError::QuotaExceeded
    } else {
        LlmError::Transport(haystack.to_string())
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn key_prefix(&self) -> &str {
        KEY_PREFIX
    }

    #[instrument(skip(self, api_key, turns), fields(model = %self.model, turns = turns.len()))]
    async fn complete(&self, api_key: &str, turns: &[Turn]) -> Result<String, LlmError> {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(self.base_url.clone());
        let client = Client::with_config(config);

        let messages = self.build_messages(turns).map_err(classify_openai_error)?;
        info!(
            api_key = %mask_token(api_key),
            message_count = messages.len(),
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(classify_openai_error)?;

        let response = client.chat().create(request).await.map_err(|e| {
            let err = classify_openai_error(e);
            warn!(error = %err, "OpenAI request failed");
            err
        })?;

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => Err(LlmError::Transport("no choices in response".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_api_text() {
        assert_eq!(
            classify_api_text("some(\"invalid_api_key\") incorrect api key provided"),
            LlmError::InvalidKey
        );
        assert_eq!(
            classify_api_text("some(\"insufficient_quota\") you exceeded your current quota"),
            LlmError::QuotaExceeded
        );
        assert_eq!(
            classify_api_text("some(\"rate_limit_exceeded\")"),
            LlmError::QuotaExceeded
        );
        assert!(matches!(
            classify_api_text("server_error"),
            LlmError::Transport(_)
        ));
    }

    #[test]
    fn test_build_messages_prepends_system() {
        let client = OpenAILlmClient::new().with_system_prompt_opt(Some("Be brief.".to_string()));
        let messages = client
            .build_messages(&[Turn::user("hi"), Turn::assistant("hello")])
            .unwrap();
        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(messages[2], ChatCompletionRequestMessage::Assistant(_)));
    }
}
