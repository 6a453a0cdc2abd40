//! Identifier newtypes.
//!
//! Every entity is scoped by an opaque [`UserId`] assigned by the delivery
//! channel. Row identifiers are storage-assigned and only meaningful
//! together with the owning user id.

use serde::{Deserialize, Serialize};

/// Opaque end-user identity, unique per user of the delivery channel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct UserId(i64);

impl UserId {
    /// The raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Storage-assigned author identifier, unique within one user's rows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct AuthorId(i64);

impl AuthorId {
    /// The raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Storage-assigned story identifier, unique within one user's rows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct StoryId(i64);

impl StoryId {
    /// The raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Storage-assigned review identifier, unique within one user's rows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ReviewId(i64);

impl ReviewId {
    /// The raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Correlation token linking all interactions belonging to one in-flight
/// workflow instance.
///
/// Derived from the originating interaction, e.g. the id of the message
/// that started the workflow.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct CorrelationToken(i64);

impl CorrelationToken {
    /// The raw token value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Conversation handle renders are addressed to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ConversationId(i64);

impl ConversationId {
    /// The raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}
