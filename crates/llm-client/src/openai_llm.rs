//! [`LlmClient`] backed by openai-client chat completion.

use async_trait::async_trait;
use conversation::Turn;
use relay_core::Result;
use tracing::instrument;

use super::{completion_error, system_message, turn_to_openai, LlmClient};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI chat completion client. Sends the history as-is, optionally behind a system prompt.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Blank prompts are treated as absent.
    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, history), fields(model = %self.model, turns = history.len()))]
    async fn complete(&self, history: &[Turn]) -> Result<String> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(system_message(prompt)?);
        }
        for turn in history {
            messages.push(turn_to_openai(turn)?);
        }
        self.client
            .chat_completion(&self.model, messages)
            .await
            .map_err(completion_error)
    }
}
