//! # Relay handlers
//!
//! The relay's behavior on top of the handler chain: [`TurnDispatcher`] decides what a
//! message turns into, [`CommandHandler`] switches modes, [`RelayHandler`] delivers dispatcher
//! results through a [`relay_core::Bot`], and [`LoggingHandler`] records traffic.

mod command;
mod dispatcher;
mod logging;
mod relay_handler;

pub use command::{
    command_keyboard, Command, CommandHandler, ASK_PICTURE_TEXT, ASK_QUESTION_TEXT,
    MAINTENANCE_NOTICE,
};
pub use dispatcher::{OutboundPayload, TurnDispatcher, IMAGE_MIME_TYPE};
pub use logging::LoggingHandler;
pub use relay_handler::RelayHandler;
