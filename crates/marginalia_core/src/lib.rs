//! Core data types for the Marginalia reading diary bot.
//!
//! This crate provides the foundation data types shared across the
//! Marginalia crates: entity identifiers, the validated review rank, and
//! the wire types exchanged with the delivery channel (inbound
//! interactions, outbound renders, callback payloads).

mod grid;
mod ids;
mod interaction;
mod payload;
mod rank;
mod render;

pub use grid::{reshape, rows_for_columns};
pub use ids::{AuthorId, ConversationId, CorrelationToken, ReviewId, StoryId, UserId};
pub use interaction::{Interaction, InteractionKind};
pub use payload::{CallbackPayload, ConfirmAnswer, WorkflowLabel};
pub use rank::Rank;
pub use render::{Keyboard, KeyboardButton, Render};
