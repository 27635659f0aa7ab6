//! Turn dispatcher: one inbound message in, one outbound payload (or a classified failure) out.
//!
//! Text mode: the user turn is appended, the whole history goes to the completion service and
//! the reply is appended as an assistant turn before the history is trimmed to its cap.
//!
//! Image mode: the pending request is consumed first, the message is used as an image prompt
//! and does not stay in the history; the generated picture is written to the image store.
//!
//! A failed completion leaves the user turn in place. The next request therefore carries two
//! consecutive user turns, which the completion service accepts. The history is trimmed before
//! each new user turn as well, so repeated failures cannot grow it past the cap.

use conversation::{ConversationId, ConversationStore, Turn};
use llm_client::{ImageGenerator, LlmClient};
use relay_core::{RelayError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use storage::ImageStore;
use tracing::{error, info, instrument, warn};

/// MIME type of generated images.
pub const IMAGE_MIME_TYPE: &str = "image/png";

/// What the dispatcher asks the transport to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundPayload {
    Text(String),
    Image {
        bytes: Vec<u8>,
        mime_type: &'static str,
        /// Where the image was persisted.
        path: PathBuf,
    },
}

/// Routes each inbound message to the completion or image service according to the
/// conversation's mode.
pub struct TurnDispatcher {
    store: Arc<ConversationStore>,
    llm: Arc<dyn LlmClient>,
    images: Arc<dyn ImageGenerator>,
    image_store: Arc<dyn ImageStore>,
}

impl TurnDispatcher {
    pub fn new(
        store: Arc<ConversationStore>,
        llm: Arc<dyn LlmClient>,
        images: Arc<dyn ImageGenerator>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            store,
            llm,
            images,
            image_store,
        }
    }

    /// The conversation store shared with the command handler.
    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    /// Processes one message of `conversation_id`.
    #[instrument(skip(self, text), fields(conversation_id = conversation_id))]
    pub async fn handle_message(
        &self,
        conversation_id: ConversationId,
        text: &str,
    ) -> Result<OutboundPayload> {
        self.store.trim(conversation_id);
        self.store.push_turn(conversation_id, Turn::user(text));

        if self.store.take_image_request(conversation_id) {
            self.store.pop_last_turn(conversation_id);
            return self.generate_image(conversation_id, text).await;
        }

        self.complete(conversation_id).await
    }

    async fn complete(&self, conversation_id: ConversationId) -> Result<OutboundPayload> {
        let history = self.store.history(conversation_id);
        info!(turns = history.len(), "step: requesting completion");

        let reply = match self.llm.complete(&history).await {
            Ok(reply) => reply,
            Err(e) if e.is_expected() => {
                warn!(error = %e, "completion refused; user turn kept");
                return Err(e);
            }
            Err(e) => {
                error!(error = %e, "completion failed; user turn kept");
                return Err(e);
            }
        };

        self.store
            .push_turn(conversation_id, Turn::assistant(reply.clone()));
        self.store.trim(conversation_id);
        info!(reply_len = reply.len(), "step: completion received");
        Ok(OutboundPayload::Text(reply))
    }

    async fn generate_image(
        &self,
        conversation_id: ConversationId,
        prompt: &str,
    ) -> Result<OutboundPayload> {
        info!(
            prompt_preview = %prompt.chars().take(50).collect::<String>(),
            "step: image request consumed"
        );

        let bytes = match self.images.generate(prompt).await {
            Ok(bytes) => bytes,
            Err(e) if e.is_expected() => {
                warn!(conversation_id, error = %e, "image prompt refused");
                return Err(e);
            }
            Err(e) => {
                error!(conversation_id, error = %e, "image generation failed");
                return Err(e);
            }
        };

        let path = self
            .image_store
            .save(prompt, &bytes)
            .await
            .map_err(|e| RelayError::Storage(e.to_string()))?;

        Ok(OutboundPayload::Image {
            bytes,
            mime_type: IMAGE_MIME_TYPE,
            path,
        })
    }
}
