//! Relational storage for the Marginalia reading diary bot.
//!
//! Four tables (users, authors, stories, reviews), all scoped by user id,
//! accessed through [`StorageEngine`]. Deletes cascade explicitly inside
//! one transaction per logical operation: removing an author removes that
//! user's stories by the author and the reviews of those stories, and
//! removing a story removes its reviews. Rows never cross user
//! boundaries; every query filters by the caller's user id.

#![warn(missing_docs)]

mod connection;
mod engine;
mod models;
pub mod schema;

pub use connection::{MIGRATIONS, SqlitePool, create_in_memory_pool, create_pool};
pub use engine::StorageEngine;
pub use models::{AuthorRecord, AuthorRow, NewAuthor, NewReview, NewStory, ReviewRecord, StoryRecord, StoryRow};
