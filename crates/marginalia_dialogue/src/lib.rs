//! Multi-step dialogue state machine for the Marginalia reading diary bot.
//!
//! Each workflow (add or remove an author, story, or review) is a strict
//! linear sequence of steps. Every step consumes one inbound interaction
//! and produces one render plus a transition, correlated across
//! interactions by the token of the message that opened the workflow.
//! Partially-built drafts live in the session store between steps; only
//! identifiers and labels travel through keyboard payloads.
//!
//! Every mutating workflow funnels through the shared confirmation
//! protocol: a binary affirm/decline prompt whose payload carries the
//! workflow label, checked exactly against the open session before any
//! write happens. A click that cannot be correlated (unknown token,
//! foreign user, wrong label, wrong step) ends the workflow with a
//! neutral message instead of resuming with stale data.

#![warn(missing_docs)]

mod confirm;
mod dialogue;
mod format;
mod handlers;
mod keyboards;
mod state;

pub use dialogue::Dialogue;
pub use format::{format_authors, format_reviews, format_stories};
pub use keyboards::{
    RANK_COLUMNS, SELECT_COLUMNS, authors_keyboard, confirm_keyboard, rank_keyboard,
    review_preview, reviews_keyboard, stories_keyboard,
};
pub use state::{SelectedAuthor, SelectedStory, WorkflowState};
