//! Workflow states: one variant per step, draft included.
//!
//! Folding the step and the accumulated draft into a single enum makes the
//! correlation record `{token, label, step}` checkable exactly: the token
//! keys the session, the label comes from the variant, and the step is the
//! variant itself.

use marginalia_core::{Rank, ReviewId, WorkflowLabel};
use marginalia_storage::{AuthorRecord, StoryRecord};

/// An author picked from a selection keyboard, resolved to id plus name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAuthor {
    /// Author id within the owning user's rows.
    pub id: marginalia_core::AuthorId,
    /// Author name, kept for prompt text.
    pub name: String,
}

impl From<AuthorRecord> for SelectedAuthor {
    fn from(record: AuthorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

/// A story picked from a selection keyboard, resolved to id plus title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedStory {
    /// Story id within the owning user's rows.
    pub id: marginalia_core::StoryId,
    /// Story title, kept for prompt text.
    pub title: String,
}

impl From<StoryRecord> for SelectedStory {
    fn from(record: StoryRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
        }
    }
}

/// The step an open workflow is waiting at, with its draft so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// add-author: waiting for the confirm click.
    AddAuthorConfirm {
        /// Name of the author to add.
        name: String,
    },
    /// add-story: waiting for an author selection.
    AddStorySelectAuthor {
        /// Title of the story to add.
        title: String,
    },
    /// add-story: waiting for the confirm click.
    AddStoryConfirm {
        /// Title of the story to add.
        title: String,
        /// Selected author.
        author: SelectedAuthor,
    },
    /// add-review: waiting for an author selection.
    AddReviewSelectAuthor {
        /// Review text.
        text: String,
    },
    /// add-review: waiting for a story selection.
    AddReviewSelectStory {
        /// Review text.
        text: String,
        /// Selected author.
        author: SelectedAuthor,
    },
    /// add-review: waiting for a rank selection.
    AddReviewSelectRank {
        /// Review text.
        text: String,
        /// Selected author.
        author: SelectedAuthor,
        /// Selected story.
        story: SelectedStory,
    },
    /// add-review: waiting for the confirm click.
    AddReviewConfirm {
        /// Review text.
        text: String,
        /// Selected author.
        author: SelectedAuthor,
        /// Selected story.
        story: SelectedStory,
        /// Selected rank.
        rank: Rank,
    },
    /// remove-author: waiting for an author selection.
    RemoveAuthorSelect,
    /// remove-author: waiting for the confirm click.
    RemoveAuthorConfirm {
        /// Author to remove, with cascade.
        author: SelectedAuthor,
    },
    /// remove-story: waiting for an author selection.
    RemoveStorySelectAuthor,
    /// remove-story: waiting for a story selection scoped to the author.
    RemoveStorySelectStory {
        /// Selected author.
        author: SelectedAuthor,
    },
    /// remove-story: waiting for the confirm click.
    RemoveStoryConfirm {
        /// Story to remove, with cascade.
        story: SelectedStory,
    },
    /// remove-review: waiting for an author selection.
    RemoveReviewSelectAuthor,
    /// remove-review: waiting for a story selection scoped to the author.
    RemoveReviewSelectStory {
        /// Selected author.
        author: SelectedAuthor,
    },
    /// remove-review: waiting for a review selection scoped to the story.
    RemoveReviewSelectReview {
        /// Selected author.
        author: SelectedAuthor,
        /// Selected story.
        story: SelectedStory,
    },
    /// remove-review: waiting for the confirm click.
    RemoveReviewConfirm {
        /// Review to remove.
        review: ReviewId,
    },
}

impl WorkflowState {
    /// The workflow this step belongs to.
    pub fn label(&self) -> WorkflowLabel {
        match self {
            WorkflowState::AddAuthorConfirm { .. } => WorkflowLabel::AddAuthor,
            WorkflowState::AddStorySelectAuthor { .. } | WorkflowState::AddStoryConfirm { .. } => {
                WorkflowLabel::AddStory
            }
            WorkflowState::AddReviewSelectAuthor { .. }
            | WorkflowState::AddReviewSelectStory { .. }
            | WorkflowState::AddReviewSelectRank { .. }
            | WorkflowState::AddReviewConfirm { .. } => WorkflowLabel::AddReview,
            WorkflowState::RemoveAuthorSelect | WorkflowState::RemoveAuthorConfirm { .. } => {
                WorkflowLabel::RemoveAuthor
            }
            WorkflowState::RemoveStorySelectAuthor
            | WorkflowState::RemoveStorySelectStory { .. }
            | WorkflowState::RemoveStoryConfirm { .. } => WorkflowLabel::RemoveStory,
            WorkflowState::RemoveReviewSelectAuthor
            | WorkflowState::RemoveReviewSelectStory { .. }
            | WorkflowState::RemoveReviewSelectReview { .. }
            | WorkflowState::RemoveReviewConfirm { .. } => WorkflowLabel::RemoveReview,
        }
    }

    /// Short step name for logs and stale-session diagnostics.
    pub fn step_name(&self) -> &'static str {
        match self {
            WorkflowState::AddAuthorConfirm { .. } => "add_author/confirm",
            WorkflowState::AddStorySelectAuthor { .. } => "add_story/select_author",
            WorkflowState::AddStoryConfirm { .. } => "add_story/confirm",
            WorkflowState::AddReviewSelectAuthor { .. } => "add_review/select_author",
            WorkflowState::AddReviewSelectStory { .. } => "add_review/select_story",
            WorkflowState::AddReviewSelectRank { .. } => "add_review/select_rank",
            WorkflowState::AddReviewConfirm { .. } => "add_review/confirm",
            WorkflowState::RemoveAuthorSelect => "remove_author/select_author",
            WorkflowState::RemoveAuthorConfirm { .. } => "remove_author/confirm",
            WorkflowState::RemoveStorySelectAuthor => "remove_story/select_author",
            WorkflowState::RemoveStorySelectStory { .. } => "remove_story/select_story",
            WorkflowState::RemoveStoryConfirm { .. } => "remove_story/confirm",
            WorkflowState::RemoveReviewSelectAuthor => "remove_review/select_author",
            WorkflowState::RemoveReviewSelectStory { .. } => "remove_review/select_story",
            WorkflowState::RemoveReviewSelectReview { .. } => "remove_review/select_review",
            WorkflowState::RemoveReviewConfirm { .. } => "remove_review/confirm",
        }
    }

    /// Whether this step is the terminal confirm step of its workflow.
    pub fn is_confirm(&self) -> bool {
        matches!(
            self,
            WorkflowState::AddAuthorConfirm { .. }
                | WorkflowState::AddStoryConfirm { .. }
                | WorkflowState::AddReviewConfirm { .. }
                | WorkflowState::RemoveAuthorConfirm { .. }
                | WorkflowState::RemoveStoryConfirm { .. }
                | WorkflowState::RemoveReviewConfirm { .. }
        )
    }
}
