//! Diesel models and caller-facing records for the diary tables.

use diesel::prelude::*;
use marginalia_core::{AuthorId, Rank, ReviewId, StoryId};

/// Database row for the authors table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::authors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuthorRow {
    /// Storage-assigned identifier
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Author name
    pub name: String,
}

/// Insertable struct for the authors table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::authors)]
pub struct NewAuthor<'a> {
    /// Owning user
    pub user_id: i64,
    /// Author name
    pub name: &'a str,
}

/// Database row for the stories table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::stories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StoryRow {
    /// Storage-assigned identifier
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Story title
    pub title: String,
    /// Author the story belongs to, same user
    pub author_id: i64,
}

/// Insertable struct for the stories table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::stories)]
pub struct NewStory<'a> {
    /// Owning user
    pub user_id: i64,
    /// Story title
    pub title: &'a str,
    /// Author the story belongs to
    pub author_id: i64,
}

/// Insertable struct for the reviews table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    /// Owning user
    pub user_id: i64,
    /// Story the review is about
    pub story_id: i64,
    /// Review text
    pub text: &'a str,
    /// Rank, already validated to [0, 5]
    pub rank: i32,
}

/// An author as returned to callers, with a typed identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    /// Storage-assigned identifier
    pub id: AuthorId,
    /// Author name
    pub name: String,
}

impl From<AuthorRow> for AuthorRecord {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: AuthorId::from(row.id),
            name: row.name,
        }
    }
}

/// A story joined with its author's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRecord {
    /// Storage-assigned identifier
    pub id: StoryId,
    /// Story title
    pub title: String,
    /// Name of the author, resolved through the join
    pub author_name: String,
}

/// A review joined with its story title and author name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    /// Storage-assigned identifier
    pub id: ReviewId,
    /// Review text
    pub text: String,
    /// Rank in [0, 5]
    pub rank: Rank,
    /// Title of the reviewed story, resolved through the join
    pub story_title: String,
    /// Name of the story's author, resolved through the join
    pub author_name: String,
}
