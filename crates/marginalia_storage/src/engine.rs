//! The storage engine: per-user CRUD with cascade-on-delete semantics.
//!
//! Every operation takes an explicit [`UserId`] and filters by it, so rows
//! never leak across users. Every mutating operation runs inside a single
//! immediate transaction; cascades are explicit application-level deletes
//! of children before parents inside that transaction, not triggers.

use crate::connection::{SqlitePool, create_in_memory_pool, create_pool};
use crate::models::{AuthorRecord, AuthorRow, NewAuthor, NewReview, NewStory, ReviewRecord, StoryRecord};
use crate::schema::{authors, reviews, stories, users};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sqlite::SqliteConnection;
use marginalia_core::{AuthorId, Rank, ReviewId, StoryId, UserId};
use marginalia_error::{StorageResult, ValidationError, ValidationErrorKind};
use tracing::instrument;

diesel::define_sql_function! {
    fn last_insert_rowid() -> diesel::sql_types::BigInt;
}

type PooledSqlite = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Relational storage for users, authors, stories, and reviews.
///
/// Cheap to clone; clones share the underlying connection pool, so
/// distinct users' interactions can proceed concurrently with
/// per-operation atomicity and no global lock.
#[derive(Debug, Clone)]
pub struct StorageEngine {
    pool: SqlitePool,
}

impl StorageEngine {
    /// Open (or create) the database at the given URL and run migrations.
    pub fn open(database_url: &str) -> StorageResult<Self> {
        Ok(Self {
            pool: create_pool(database_url)?,
        })
    }

    /// Open a private in-memory database, for tests and ephemeral use.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            pool: create_in_memory_pool()?,
        })
    }

    fn conn(&self) -> StorageResult<PooledSqlite> {
        Ok(self.pool.get()?)
    }

    /// Insert the user row if this identity has never been seen.
    ///
    /// Idempotent; returns whether the user was newly created.
    #[instrument(skip(self))]
    pub fn register_user_if_absent(&self, user: UserId) -> StorageResult<bool> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, marginalia_error::StorageError, _>(|conn| {
            let existing: Option<i64> = users::table
                .find(user.get())
                .select(users::id)
                .first(conn)
                .optional()?;
            if existing.is_some() {
                tracing::debug!(%user, "user already registered");
                return Ok(false);
            }
            diesel::insert_into(users::table)
                .values(users::id.eq(user.get()))
                .execute(conn)?;
            tracing::debug!(%user, "registered new user");
            Ok(true)
        })
    }

    /// Insert an author and return its fresh id.
    #[instrument(skip(self))]
    pub fn create_author(&self, user: UserId, name: &str) -> StorageResult<AuthorId> {
        if name.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyAuthorName).into());
        }
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, marginalia_error::StorageError, _>(|conn| {
            diesel::insert_into(authors::table)
                .values(NewAuthor {
                    user_id: user.get(),
                    name,
                })
                .execute(conn)?;
            let id: i64 = diesel::select(last_insert_rowid()).get_result(conn)?;
            Ok(AuthorId::from(id))
        })
    }

    /// Exact-match author lookup by name.
    ///
    /// `(user_id, name)` is expected unique in practice but not enforced
    /// at the storage level. More than one match is a consistency fault:
    /// logged at high severity, first match by insertion order wins, the
    /// call never fails for it.
    #[instrument(skip(self))]
    pub fn find_author_id(&self, user: UserId, name: &str) -> StorageResult<Option<AuthorId>> {
        let mut conn = self.conn()?;
        let ids: Vec<i64> = authors::table
            .filter(authors::user_id.eq(user.get()))
            .filter(authors::name.eq(name))
            .select(authors::id)
            .order(authors::id.asc())
            .load(&mut conn)?;
        if ids.len() > 1 {
            tracing::error!(
                %user,
                name,
                matches = ids.len(),
                "consistency fault: more than one author matches a unique lookup"
            );
        }
        Ok(ids.first().copied().map(AuthorId::from))
    }

    /// Fetch a single author by id.
    #[instrument(skip(self))]
    pub fn get_author(&self, user: UserId, author: AuthorId) -> StorageResult<Option<AuthorRecord>> {
        let mut conn = self.conn()?;
        let row: Option<AuthorRow> = authors::table
            .filter(authors::user_id.eq(user.get()))
            .filter(authors::id.eq(author.get()))
            .select(AuthorRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(AuthorRecord::from))
    }

    /// All of the user's authors, in insertion order.
    #[instrument(skip(self))]
    pub fn list_authors(&self, user: UserId) -> StorageResult<Vec<AuthorRecord>> {
        let mut conn = self.conn()?;
        let rows: Vec<AuthorRow> = authors::table
            .filter(authors::user_id.eq(user.get()))
            .select(AuthorRow::as_select())
            .order(authors::id.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(AuthorRecord::from).collect())
    }

    /// All of the user's authors, sorted by name for list formatting.
    #[instrument(skip(self))]
    pub fn list_authors_by_name(&self, user: UserId) -> StorageResult<Vec<AuthorRecord>> {
        let mut conn = self.conn()?;
        let rows: Vec<AuthorRow> = authors::table
            .filter(authors::user_id.eq(user.get()))
            .select(AuthorRow::as_select())
            .order(authors::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(AuthorRecord::from).collect())
    }

    /// Delete an author and, in the same transaction, every story and
    /// review of the user that references it.
    ///
    /// The cascade is a structural guarantee: when this returns, no story
    /// or review referencing `(user, author)` exists.
    #[instrument(skip(self))]
    pub fn delete_author(&self, user: UserId, author: AuthorId) -> StorageResult<()> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, marginalia_error::StorageError, _>(|conn| {
            let story_ids: Vec<i64> = stories::table
                .filter(stories::user_id.eq(user.get()))
                .filter(stories::author_id.eq(author.get()))
                .select(stories::id)
                .load(conn)?;
            let removed_reviews = diesel::delete(
                reviews::table
                    .filter(reviews::user_id.eq(user.get()))
                    .filter(reviews::story_id.eq_any(&story_ids)),
            )
            .execute(conn)?;
            let removed_stories = diesel::delete(
                stories::table
                    .filter(stories::user_id.eq(user.get()))
                    .filter(stories::author_id.eq(author.get())),
            )
            .execute(conn)?;
            diesel::delete(
                authors::table
                    .filter(authors::user_id.eq(user.get()))
                    .filter(authors::id.eq(author.get())),
            )
            .execute(conn)?;
            tracing::debug!(
                %user,
                %author,
                removed_stories,
                removed_reviews,
                "author removed with cascade"
            );
            Ok(())
        })
    }

    /// Insert a story and return its fresh id.
    #[instrument(skip(self))]
    pub fn create_story(&self, user: UserId, title: &str, author: AuthorId) -> StorageResult<StoryId> {
        if title.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyStoryTitle).into());
        }
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, marginalia_error::StorageError, _>(|conn| {
            diesel::insert_into(stories::table)
                .values(NewStory {
                    user_id: user.get(),
                    title,
                    author_id: author.get(),
                })
                .execute(conn)?;
            let id: i64 = diesel::select(last_insert_rowid()).get_result(conn)?;
            Ok(StoryId::from(id))
        })
    }

    /// Exact-match story lookup by `(author, title)`.
    ///
    /// Same duplicate-tolerance policy as [`StorageEngine::find_author_id`].
    #[instrument(skip(self))]
    pub fn find_story_id(
        &self,
        user: UserId,
        author: AuthorId,
        title: &str,
    ) -> StorageResult<Option<StoryId>> {
        let mut conn = self.conn()?;
        let ids: Vec<i64> = stories::table
            .filter(stories::user_id.eq(user.get()))
            .filter(stories::author_id.eq(author.get()))
            .filter(stories::title.eq(title))
            .select(stories::id)
            .order(stories::id.asc())
            .load(&mut conn)?;
        if ids.len() > 1 {
            tracing::error!(
                %user,
                %author,
                title,
                matches = ids.len(),
                "consistency fault: more than one story matches a unique lookup"
            );
        }
        Ok(ids.first().copied().map(StoryId::from))
    }

    /// Fetch a single story by id, joined with its author's name.
    #[instrument(skip(self))]
    pub fn get_story(&self, user: UserId, story: StoryId) -> StorageResult<Option<StoryRecord>> {
        let mut conn = self.conn()?;
        let row: Option<(i64, String, String)> = stories::table
            .inner_join(authors::table)
            .filter(stories::user_id.eq(user.get()))
            .filter(authors::user_id.eq(user.get()))
            .filter(stories::id.eq(story.get()))
            .select((stories::id, stories::title, authors::name))
            .first(&mut conn)
            .optional()?;
        Ok(row.map(|(id, title, author_name)| StoryRecord {
            id: StoryId::from(id),
            title,
            author_name,
        }))
    }

    /// The user's stories joined with author names.
    ///
    /// Sorted by `(author name, title)` without a filter, by title when
    /// scoped to one author.
    #[instrument(skip(self))]
    pub fn list_stories(
        &self,
        user: UserId,
        author: Option<AuthorId>,
    ) -> StorageResult<Vec<StoryRecord>> {
        let mut conn = self.conn()?;
        let base = stories::table
            .inner_join(authors::table)
            .filter(stories::user_id.eq(user.get()))
            .filter(authors::user_id.eq(user.get()))
            .select((stories::id, stories::title, authors::name));
        let rows: Vec<(i64, String, String)> = match author {
            Some(author) => base
                .filter(stories::author_id.eq(author.get()))
                .order(stories::title.asc())
                .load(&mut conn)?,
            None => base
                .order((authors::name.asc(), stories::title.asc()))
                .load(&mut conn)?,
        };
        Ok(rows
            .into_iter()
            .map(|(id, title, author_name)| StoryRecord {
                id: StoryId::from(id),
                title,
                author_name,
            })
            .collect())
    }

    /// Delete a story and, in the same transaction, every review of the
    /// user that references it.
    #[instrument(skip(self))]
    pub fn delete_story(&self, user: UserId, story: StoryId) -> StorageResult<()> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, marginalia_error::StorageError, _>(|conn| {
            let removed_reviews = diesel::delete(
                reviews::table
                    .filter(reviews::user_id.eq(user.get()))
                    .filter(reviews::story_id.eq(story.get())),
            )
            .execute(conn)?;
            diesel::delete(
                stories::table
                    .filter(stories::user_id.eq(user.get()))
                    .filter(stories::id.eq(story.get())),
            )
            .execute(conn)?;
            tracing::debug!(%user, %story, removed_reviews, "story removed with cascade");
            Ok(())
        })
    }

    /// Insert a review and return its fresh id.
    ///
    /// The rank is validated by construction of [`Rank`]. One review per
    /// `(user, story)`: a second insert for the same story is rejected
    /// with a validation error before anything is written.
    #[instrument(skip(self, text))]
    pub fn create_review(
        &self,
        user: UserId,
        story: StoryId,
        text: &str,
        rank: Rank,
    ) -> StorageResult<ReviewId> {
        if text.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyReviewText).into());
        }
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, marginalia_error::StorageError, _>(|conn| {
            let existing: Option<i64> = reviews::table
                .filter(reviews::user_id.eq(user.get()))
                .filter(reviews::story_id.eq(story.get()))
                .select(reviews::id)
                .first(conn)
                .optional()?;
            if existing.is_some() {
                return Err(ValidationError::new(ValidationErrorKind::DuplicateReview).into());
            }
            diesel::insert_into(reviews::table)
                .values(NewReview {
                    user_id: user.get(),
                    story_id: story.get(),
                    text,
                    rank: rank.get(),
                })
                .execute(conn)?;
            let id: i64 = diesel::select(last_insert_rowid()).get_result(conn)?;
            Ok(ReviewId::from(id))
        })
    }

    /// Fetch a single review by id, joined with story title and author name.
    #[instrument(skip(self))]
    pub fn get_review(&self, user: UserId, review: ReviewId) -> StorageResult<Option<ReviewRecord>> {
        let mut conn = self.conn()?;
        let row: Option<(i64, String, i32, String, String)> = reviews::table
            .inner_join(stories::table.inner_join(authors::table))
            .filter(reviews::user_id.eq(user.get()))
            .filter(stories::user_id.eq(user.get()))
            .filter(authors::user_id.eq(user.get()))
            .filter(reviews::id.eq(review.get()))
            .select((
                reviews::id,
                reviews::text,
                reviews::rank,
                stories::title,
                authors::name,
            ))
            .first(&mut conn)
            .optional()?;
        row.map(Self::review_record).transpose()
    }

    /// The user's reviews joined with story titles and author names,
    /// sorted by `(author name, story title, text)`.
    #[instrument(skip(self))]
    pub fn list_reviews(
        &self,
        user: UserId,
        author: Option<AuthorId>,
    ) -> StorageResult<Vec<ReviewRecord>> {
        let mut conn = self.conn()?;
        let base = reviews::table
            .inner_join(stories::table.inner_join(authors::table))
            .filter(reviews::user_id.eq(user.get()))
            .filter(stories::user_id.eq(user.get()))
            .filter(authors::user_id.eq(user.get()))
            .select((
                reviews::id,
                reviews::text,
                reviews::rank,
                stories::title,
                authors::name,
            ))
            .order((authors::name.asc(), stories::title.asc(), reviews::text.asc()));
        let rows: Vec<(i64, String, i32, String, String)> = match author {
            Some(author) => base
                .filter(stories::author_id.eq(author.get()))
                .load(&mut conn)?,
            None => base.load(&mut conn)?,
        };
        rows.into_iter().map(Self::review_record).collect()
    }

    /// The user's reviews of one story.
    #[instrument(skip(self))]
    pub fn list_story_reviews(
        &self,
        user: UserId,
        story: StoryId,
    ) -> StorageResult<Vec<ReviewRecord>> {
        let mut conn = self.conn()?;
        let rows: Vec<(i64, String, i32, String, String)> = reviews::table
            .inner_join(stories::table.inner_join(authors::table))
            .filter(reviews::user_id.eq(user.get()))
            .filter(stories::user_id.eq(user.get()))
            .filter(authors::user_id.eq(user.get()))
            .filter(stories::id.eq(story.get()))
            .select((
                reviews::id,
                reviews::text,
                reviews::rank,
                stories::title,
                authors::name,
            ))
            .order(reviews::text.asc())
            .load(&mut conn)?;
        rows.into_iter().map(Self::review_record).collect()
    }

    /// Delete a single review.
    #[instrument(skip(self))]
    pub fn delete_review(&self, user: UserId, review: ReviewId) -> StorageResult<()> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, marginalia_error::StorageError, _>(|conn| {
            diesel::delete(
                reviews::table
                    .filter(reviews::user_id.eq(user.get()))
                    .filter(reviews::id.eq(review.get())),
            )
            .execute(conn)?;
            Ok(())
        })
    }

    fn review_record(
        (id, text, rank, story_title, author_name): (i64, String, i32, String, String),
    ) -> StorageResult<ReviewRecord> {
        // The CHECK constraint keeps stored ranks in range; a violation
        // here means the database was modified out of band.
        let rank = Rank::new(rank)?;
        Ok(ReviewRecord {
            id: ReviewId::from(id),
            text,
            rank,
            story_title,
            author_name,
        })
    }
}
