//! The add-review and remove-review workflows.

use crate::dialogue::Dialogue;
use crate::format::format_reviews;
use crate::keyboards::{authors_keyboard, confirm_keyboard, rank_keyboard, reviews_keyboard, stories_keyboard};
use crate::state::{SelectedAuthor, SelectedStory, WorkflowState};
use marginalia_core::{CorrelationToken, Rank, Render, ReviewId, UserId, WorkflowLabel};
use marginalia_error::{MarginaliaResult, StaleSessionError, StaleSessionErrorKind};

const ADD_REVIEW_USAGE: &str = "Add a review: /add_review REVIEW_TEXT";
const NO_REVIEWS_TEXT: &str = "You have no reviews yet. Add one with /add_review.";
const RANK_RANGE_TEXT: &str = "Rank must be between 0 and 5. Start the command again.";

impl Dialogue {
    /// `/add_review TEXT`: opens the author selection keyboard.
    pub(crate) fn add_review_entry(
        &self,
        user: UserId,
        token: CorrelationToken,
        args: &[String],
    ) -> MarginaliaResult<Render> {
        let text = args.join(" ");
        let text = text.trim();
        if text.is_empty() {
            return Ok(Render::text(ADD_REVIEW_USAGE));
        }
        let authors = self.storage().list_authors(user)?;
        let prompt = "Pick an author";
        let keyboard = authors_keyboard(&authors, token)?;
        self.open_session(
            token,
            user,
            prompt,
            WorkflowState::AddReviewSelectAuthor {
                text: text.to_string(),
            },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Author picked for a new review: narrow down to one of their stories.
    pub(crate) fn add_review_pick_author(
        &self,
        user: UserId,
        token: CorrelationToken,
        text: String,
        author: SelectedAuthor,
    ) -> MarginaliaResult<Render> {
        let stories = self.storage().list_stories(user, Some(author.id))?;
        let prompt = format!("Pick a story by `{}`", author.name);
        let keyboard = stories_keyboard(&stories, token)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::AddReviewSelectStory { text, author },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Story picked for a new review: ask for a rank.
    pub(crate) fn add_review_pick_story(
        &self,
        user: UserId,
        token: CorrelationToken,
        text: String,
        author: SelectedAuthor,
        story: SelectedStory,
    ) -> MarginaliaResult<Render> {
        let prompt = format!("Rate `{}` by `{}`", story.title, author.name);
        let keyboard = rank_keyboard(token)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::AddReviewSelectRank {
                text,
                author,
                story,
            },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Rank picked for a new review: ask for confirmation.
    ///
    /// The rank arrives as a raw integer from the payload; an out-of-range
    /// value cannot come from our own keyboard, so the workflow ends with a
    /// hint instead of advancing.
    pub(crate) fn add_review_pick_rank(
        &self,
        user: UserId,
        token: CorrelationToken,
        text: String,
        author: SelectedAuthor,
        story: SelectedStory,
        rank: i32,
    ) -> MarginaliaResult<Render> {
        let rank = match Rank::new(rank) {
            Ok(rank) => rank,
            Err(err) => {
                tracing::warn!(error = %err, "rank payload out of range");
                return Ok(Render::text(RANK_RANGE_TEXT));
            }
        };
        let prompt = format!(
            "Add a review of `{}` by `{}` with rank `{rank}`?",
            story.title, author.name
        );
        let keyboard = confirm_keyboard(token, WorkflowLabel::AddReview)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::AddReviewConfirm {
                text,
                author,
                story,
                rank,
            },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// `/list_reviews`: reviews grouped author then story.
    pub(crate) fn list_reviews_command(&self, user: UserId) -> MarginaliaResult<Render> {
        let reviews = self.storage().list_reviews(user, None)?;
        if reviews.is_empty() {
            return Ok(Render::text(NO_REVIEWS_TEXT));
        }
        Ok(Render::text(format!(
            "Your reviews:\n\n{}",
            format_reviews(&reviews)
        )))
    }

    /// `/remove_review`: opens the author selection keyboard.
    pub(crate) fn remove_review_entry(
        &self,
        user: UserId,
        token: CorrelationToken,
    ) -> MarginaliaResult<Render> {
        let authors = self.storage().list_authors(user)?;
        let prompt = "Pick an author";
        let keyboard = authors_keyboard(&authors, token)?;
        self.open_session(token, user, prompt, WorkflowState::RemoveReviewSelectAuthor);
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Author picked for removal: narrow down to one of their stories.
    pub(crate) fn remove_review_pick_author(
        &self,
        user: UserId,
        token: CorrelationToken,
        author: SelectedAuthor,
    ) -> MarginaliaResult<Render> {
        let stories = self.storage().list_stories(user, Some(author.id))?;
        let prompt = format!("Pick a story by `{}`", author.name);
        let keyboard = stories_keyboard(&stories, token)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::RemoveReviewSelectStory { author },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Story picked for removal: narrow down to one of its reviews.
    pub(crate) fn remove_review_pick_story(
        &self,
        user: UserId,
        token: CorrelationToken,
        author: SelectedAuthor,
        story: SelectedStory,
    ) -> MarginaliaResult<Render> {
        let reviews = self.storage().list_story_reviews(user, story.id)?;
        let prompt = format!("Pick your review of `{}` by `{}`", story.title, author.name);
        let keyboard = reviews_keyboard(&reviews, token)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::RemoveReviewSelectReview { author, story },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Review picked for removal: ask for confirmation.
    pub(crate) fn remove_review_pick_review(
        &self,
        user: UserId,
        token: CorrelationToken,
        author: SelectedAuthor,
        story: SelectedStory,
        review: ReviewId,
    ) -> MarginaliaResult<Render> {
        if self.storage().get_review(user, review)?.is_none() {
            return Ok(self.stale(StaleSessionError::new(
                StaleSessionErrorKind::VanishedEntity("review".to_string()),
            )));
        }
        let prompt = format!(
            "Remove your review of `{}` by `{}`?",
            story.title, author.name
        );
        let keyboard = confirm_keyboard(token, WorkflowLabel::RemoveReview)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::RemoveReviewConfirm { review },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }
}
