//! Inbound interaction types.

use crate::{CorrelationToken, UserId};

/// One inbound event from the delivery channel.
///
/// Carries the originating user, the id of the message that delivered the
/// event (used as the correlation token when a new workflow opens), and
/// either a command with positional arguments or an opaque callback
/// payload echoed back from a keyboard button.
#[derive(Debug, Clone)]
pub struct Interaction {
    user: UserId,
    token: CorrelationToken,
    kind: InteractionKind,
}

/// The two shapes an interaction can take.
#[derive(Debug, Clone)]
pub enum InteractionKind {
    /// A named command with zero or more positional text arguments.
    Command {
        /// Command name without any leading slash.
        name: String,
        /// Positional arguments, already split by the transport.
        args: Vec<String>,
    },
    /// A button click carrying the payload the button was rendered with.
    Callback {
        /// Opaque payload echoed back verbatim.
        payload: String,
    },
}

impl Interaction {
    /// Build a command interaction.
    pub fn command(
        user: UserId,
        token: CorrelationToken,
        name: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            user,
            token,
            kind: InteractionKind::Command {
                name: name.into(),
                args,
            },
        }
    }

    /// Build a callback interaction.
    pub fn callback(user: UserId, token: CorrelationToken, payload: impl Into<String>) -> Self {
        Self {
            user,
            token,
            kind: InteractionKind::Callback {
                payload: payload.into(),
            },
        }
    }

    /// The originating user.
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Id of the message that delivered this interaction.
    pub fn token(&self) -> CorrelationToken {
        self.token
    }

    /// The command or callback carried by this interaction.
    pub fn kind(&self) -> &InteractionKind {
        &self.kind
    }
}
