//! # relay-core
//!
//! Core types and traits for the relay bot: [`Bot`], [`Handler`], message and user types,
//! the [`RelayError`] taxonomy and tracing initialization. Transport-agnostic; used by
//! relay-telegram, handler-chain and relay-handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, BotCommandInfo, ReplyKeyboard};
pub use error::{
    RelayError, Result, ANSWER_REFUSED_MESSAGE, POLICY_REJECTION_MESSAGE, SERVICE_FAILURE_MESSAGE,
};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage, ToCoreUser, User,
};
