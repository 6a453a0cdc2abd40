//! Callback payloads round-tripped through keyboard buttons.
//!
//! Payloads carry identifiers and labels only. Draft entities stay in the
//! session store; nothing mutable crosses the wire.

use crate::{AuthorId, CorrelationToken, ReviewId, StoryId};
use marginalia_error::{MarginaliaResult, StaleSessionError, StaleSessionErrorKind, TransportError};
use serde::{Deserialize, Serialize};

/// Workflow discriminator carried by confirm payloads.
///
/// A confirm click is only honored when its label matches the open
/// workflow for the same correlation token, so a stray click from an
/// abandoned prompt can never commit a different workflow's draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowLabel {
    /// Adding an author
    #[display("add_author")]
    AddAuthor,
    /// Adding a story
    #[display("add_story")]
    AddStory,
    /// Adding a review
    #[display("add_review")]
    AddReview,
    /// Removing an author
    #[display("remove_author")]
    RemoveAuthor,
    /// Removing a story
    #[display("remove_story")]
    RemoveStory,
    /// Removing a review
    #[display("remove_review")]
    RemoveReview,
}

/// The two outcomes of the confirmation protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmAnswer {
    /// Commit the draft.
    Affirm,
    /// Discard the draft.
    Decline,
}

/// Structured callback payload.
///
/// Serialized to JSON for the wire; decoded exactly, never pattern-matched
/// by shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallbackPayload {
    /// Author picked from a selection keyboard.
    SelectAuthor {
        /// Correlation token of the open workflow
        token: CorrelationToken,
        /// Selected author
        author: AuthorId,
    },
    /// Story picked from a selection keyboard.
    SelectStory {
        /// Correlation token of the open workflow
        token: CorrelationToken,
        /// Selected story
        story: StoryId,
    },
    /// Review picked from a selection keyboard.
    SelectReview {
        /// Correlation token of the open workflow
        token: CorrelationToken,
        /// Selected review
        review: ReviewId,
    },
    /// Rank picked from the rank keyboard.
    SelectRank {
        /// Correlation token of the open workflow
        token: CorrelationToken,
        /// Selected rank, validated on receipt
        rank: i32,
    },
    /// Confirm or decline the terminal step of a workflow.
    Confirm {
        /// Correlation token of the open workflow
        token: CorrelationToken,
        /// Workflow the prompt belonged to
        label: WorkflowLabel,
        /// The chosen outcome
        answer: ConfirmAnswer,
    },
    /// Cancel button on a selection keyboard.
    Cancel {
        /// Correlation token of the open workflow
        token: CorrelationToken,
    },
}

impl CallbackPayload {
    /// Serialize for the wire.
    pub fn encode(&self) -> MarginaliaResult<String> {
        serde_json::to_string(self)
            .map_err(|e| TransportError::new(format!("payload encode failed: {}", e)).into())
    }

    /// Decode a payload echoed back by the delivery channel.
    ///
    /// # Errors
    ///
    /// A payload that does not decode is treated as stale, not as a fault:
    /// the transport may replay arbitrary bytes.
    pub fn decode(raw: &str) -> Result<Self, StaleSessionError> {
        serde_json::from_str(raw).map_err(|e| {
            StaleSessionError::new(StaleSessionErrorKind::MalformedPayload(e.to_string()))
        })
    }

    /// The correlation token carried by this payload.
    pub fn token(&self) -> CorrelationToken {
        match self {
            CallbackPayload::SelectAuthor { token, .. }
            | CallbackPayload::SelectStory { token, .. }
            | CallbackPayload::SelectReview { token, .. }
            | CallbackPayload::SelectRank { token, .. }
            | CallbackPayload::Confirm { token, .. }
            | CallbackPayload::Cancel { token } => *token,
        }
    }
}
