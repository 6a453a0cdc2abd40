//! The shared confirmation protocol.
//!
//! Every mutating workflow ends here: an affirm/decline click whose
//! payload carries the workflow label. The label and the step recorded in
//! the open session must both match before any write happens; a mismatch
//! ends the workflow without touching storage.

use crate::dialogue::Dialogue;
use crate::state::WorkflowState;
use marginalia_core::{ConfirmAnswer, Render, UserId, WorkflowLabel};
use marginalia_error::{MarginaliaResult, StaleSessionError, StaleSessionErrorKind};
use marginalia_session::Session;

const DUPLICATE_REVIEW_TEXT: &str =
    "You already have a review of this story. Remove it first with /remove_review.";

impl Dialogue {
    pub(crate) fn finish(
        &self,
        user: UserId,
        session: Session<WorkflowState>,
        label: WorkflowLabel,
        answer: ConfirmAnswer,
    ) -> MarginaliaResult<Render> {
        let Session { prompt, state, .. } = session;
        if state.label() != label {
            return Ok(self.stale(StaleSessionError::new(
                StaleSessionErrorKind::LabelMismatch {
                    expected: state.label().to_string(),
                    actual: label.to_string(),
                },
            )));
        }
        if !state.is_confirm() {
            return Ok(self.stale_step(&state));
        }
        if let ConfirmAnswer::Decline = answer {
            tracing::debug!(%label, "workflow declined");
            return Ok(Render::text(format!("{prompt}\nStatus: cancelled")));
        }

        let status = match state {
            WorkflowState::AddAuthorConfirm { name } => {
                self.storage().create_author(user, &name)?;
                "added"
            }
            WorkflowState::AddStoryConfirm { title, author } => {
                self.storage().create_story(user, &title, author.id)?;
                "added"
            }
            WorkflowState::AddReviewConfirm {
                text, story, rank, ..
            } => match self.storage().create_review(user, story.id, &text, rank) {
                Ok(_) => "added",
                Err(err) if err.validation().is_some() => {
                    tracing::debug!(%user, story = %story.id, "duplicate review rejected");
                    return Ok(Render::text(DUPLICATE_REVIEW_TEXT));
                }
                Err(err) => return Err(err.into()),
            },
            WorkflowState::RemoveAuthorConfirm { author } => {
                self.storage().delete_author(user, author.id)?;
                "removed"
            }
            WorkflowState::RemoveStoryConfirm { story } => {
                self.storage().delete_story(user, story.id)?;
                "removed"
            }
            WorkflowState::RemoveReviewConfirm { review } => {
                self.storage().delete_review(user, review)?;
                "removed"
            }
            other => return Ok(self.stale_step(&other)),
        };
        tracing::debug!(%label, status, "workflow committed");
        Ok(Render::text(format!("{prompt}\nStatus: {status}")))
    }
}
