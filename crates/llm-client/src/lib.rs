//! # AI service abstraction
//!
//! Defines [`LlmClient`] (ordered turn history in, reply text out) and [`ImageGenerator`]
//! (prompt in, image bytes out), plus their OpenAI implementations. Provider failures are
//! translated into [`RelayError`] here, so the dispatcher only ever branches on the relay's
//! own error kinds.

use async_trait::async_trait;
use conversation::{Role, Turn};
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, ClientError,
};
use relay_core::{RelayError, Result};

mod openai_image;
mod openai_llm;

pub use openai_image::OpenAIImageGenerator;
pub use openai_llm::{OpenAILlmClient, DEFAULT_MODEL};

/// Completion service: answers a conversation given its ordered history.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the assistant reply for `history` (oldest turn first).
    async fn complete(&self, history: &[Turn]) -> Result<String>;
}

/// Image service: turns a text prompt into a picture.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns the generated image bytes (PNG).
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>>;
}

/// Maps a provider client error onto the relay taxonomy.
pub fn relay_error(err: ClientError) -> RelayError {
    match err {
        ClientError::ContentPolicy(m) => RelayError::PolicyRejection(m),
        ClientError::MalformedResponse(m) => RelayError::ResponseShape(m),
        other @ (ClientError::Transport(_)
        | ClientError::Api { .. }
        | ClientError::InvalidRequest(_)) => RelayError::ServiceAccess(other.to_string()),
    }
}

/// Like [`relay_error`], but a content-policy refusal is reported as a refused answer.
pub fn completion_error(err: ClientError) -> RelayError {
    match err {
        ClientError::ContentPolicy(m) => RelayError::AnswerRefused(m),
        other => relay_error(other),
    }
}

fn system_message(content: &str) -> Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestSystemMessageArgs::default()
        .content(content.to_string())
        .build()
        .map_err(|e| relay_error(e.into()))?
        .into())
}

/// Converts one [`Turn`] into the OpenAI message format, keeping its role.
fn turn_to_openai(turn: &Turn) -> Result<ChatCompletionRequestMessage> {
    let content = turn.content.clone();
    let message: ChatCompletionRequestMessage = match turn.role {
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| relay_error(e.into()))?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| relay_error(e.into()))?
            .into(),
    };
    Ok(message)
}
