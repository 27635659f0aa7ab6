//! Shared mocks for relay-handlers tests: scripted AI services, recording bot, sample messages.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use conversation::{ConversationStore, Turn};
use llm_client::{ImageGenerator, LlmClient};
use relay_core::{Bot, Chat, Message, MessageDirection, RelayError, ReplyKeyboard, Result, User};
use relay_handlers::TurnDispatcher;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use storage::FileImageStore;

/// One scripted answer of a mock AI service.
#[derive(Debug, Clone)]
pub enum Scripted {
    Ok(String),
    ServiceDown,
    NoContent,
    Policy,
    Refused,
}

impl Scripted {
    fn into_result(self) -> Result<String> {
        match self {
            Scripted::Ok(s) => Ok(s),
            Scripted::ServiceDown => Err(RelayError::ServiceAccess("connection refused".into())),
            Scripted::NoContent => Err(RelayError::ResponseShape("no content".into())),
            Scripted::Policy => Err(RelayError::PolicyRejection(
                "content_policy_violation".into(),
            )),
            Scripted::Refused => Err(RelayError::AnswerRefused("content_policy_violation".into())),
        }
    }
}

/// Completion mock: pops scripted answers and records every history it was called with.
#[derive(Default)]
pub struct MockLlm {
    answers: Mutex<VecDeque<Scripted>>,
    pub calls: Mutex<Vec<Vec<Turn>>>,
}

impl MockLlm {
    pub fn new(answers: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, history: &[Turn]) -> Result<String> {
        self.calls.lock().unwrap().push(history.to_vec());
        let next = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Scripted::ServiceDown);
        next.into_result()
    }
}

/// Image mock: answers with fixed PNG bytes or a scripted failure; records prompts.
pub struct MockImages {
    outcome: Scripted,
    pub prompts: Mutex<Vec<String>>,
}

pub const FAKE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3];

impl MockImages {
    pub fn succeeding() -> Self {
        Self::with_outcome(Scripted::Ok(String::new()))
    }

    pub fn with_outcome(outcome: Scripted) -> Self {
        Self {
            outcome,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImages {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcome.clone().into_result().map(|_| FAKE_PNG.to_vec())
    }
}

/// Everything the recording bot was asked to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
        keyboard: Option<ReplyKeyboard>,
    },
    Photo {
        chat_id: i64,
        bytes: Vec<u8>,
    },
}

/// Bot mock recording outbound traffic; `failing()` rejects every send with a delivery error.
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<Sent>>,
    fail: bool,
}

impl RecordingBot {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                Sent::Photo { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: Option<&ReplyKeyboard>,
    ) -> Result<()> {
        if self.fail {
            return Err(RelayError::Delivery("bot was blocked by the user".into()));
        }
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: &Chat,
        photo: Vec<u8>,
        _keyboard: Option<&ReplyKeyboard>,
    ) -> Result<()> {
        if self.fail {
            return Err(RelayError::Delivery("bot was blocked by the user".into()));
        }
        self.sent.lock().unwrap().push(Sent::Photo {
            chat_id: chat.id,
            bytes: photo,
        });
        Ok(())
    }
}

/// Dispatcher over a fresh store, the given mocks and a file store in `image_dir`.
pub fn dispatcher(
    llm: Arc<MockLlm>,
    images: Arc<MockImages>,
    image_dir: &Path,
) -> (Arc<ConversationStore>, TurnDispatcher) {
    let store = Arc::new(ConversationStore::new());
    let dispatcher = TurnDispatcher::new(
        store.clone(),
        llm,
        images,
        Arc::new(FileImageStore::new(image_dir)),
    );
    (store, dispatcher)
}

pub fn message(chat_id: i64, content: &str) -> Message {
    Message {
        id: "msg-1".to_string(),
        user: User {
            id: 100,
            username: Some("ann42".to_string()),
            first_name: Some("Ann".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}
