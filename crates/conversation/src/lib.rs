//! # Conversation state
//!
//! Memory-resident state for every conversation the bot has seen: a short rolling window of
//! role-tagged turns (oldest first) and the [`Mode`] deciding how the next inbound message is
//! interpreted.
//!
//! ## Lifecycle
//!
//! State is created lazily on the first message for a conversation id and lives until the
//! process exits. Nothing is persisted.
//!
//! ## Thread safety
//!
//! [`ConversationStore`] is backed by a sharded `DashMap`, so workers mutating different
//! conversations concurrently never corrupt the map. Every operation takes the shard lock for
//! the duration of the call only; callers never hold a reference across an `.await`.

mod state;
mod store;

pub use state::{ConversationState, Mode, Role, Turn};
pub use store::{ConversationId, ConversationStore, DEFAULT_HISTORY_LIMIT};
