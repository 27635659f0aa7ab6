//! Chain handler that feeds plain messages to the [`TurnDispatcher`] and delivers the result.

use async_trait::async_trait;
use relay_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::dispatcher::{OutboundPayload, TurnDispatcher};

/// Relays every non-empty message to the AI services. Never fails the chain: service errors
/// become a user-facing text, delivery errors are logged and dropped.
pub struct RelayHandler {
    dispatcher: Arc<TurnDispatcher>,
    bot: Arc<dyn Bot>,
}

impl RelayHandler {
    pub fn new(dispatcher: Arc<TurnDispatcher>, bot: Arc<dyn Bot>) -> Self {
        Self { dispatcher, bot }
    }

    async fn deliver_text(&self, message: &Message, text: &str) -> HandlerResponse {
        match self.bot.send_message(&message.chat, text, None).await {
            Ok(()) => {
                debug!(chat_id = message.chat.id, "reply sent");
                HandlerResponse::Reply(text.to_string())
            }
            Err(e) => {
                error!(error = %e, chat_id = message.chat.id, "failed to deliver reply");
                HandlerResponse::Stop
            }
        }
    }
}

#[async_trait]
impl Handler for RelayHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.trim().is_empty() {
            debug!("no text, skipping relay");
            return Ok(HandlerResponse::Continue);
        }

        let outcome = self
            .dispatcher
            .handle_message(message.chat.id, &message.content)
            .await;

        let response = match outcome {
            Ok(OutboundPayload::Text(text)) => self.deliver_text(message, &text).await,
            Ok(OutboundPayload::Image { bytes, path, .. }) => {
                match self.bot.send_photo(&message.chat, bytes, None).await {
                    Ok(()) => {
                        info!(path = %path.display(), "image sent");
                        HandlerResponse::Stop
                    }
                    Err(e) => {
                        error!(error = %e, path = %path.display(), "failed to deliver image");
                        HandlerResponse::Stop
                    }
                }
            }
            Err(e) => {
                if e.is_expected() {
                    warn!(error = %e, "request rejected");
                } else {
                    error!(error = %e, "relay failed");
                }
                match e.user_message() {
                    Some(text) => self.deliver_text(message, text).await,
                    None => HandlerResponse::Stop,
                }
            }
        };
        Ok(response)
    }
}
