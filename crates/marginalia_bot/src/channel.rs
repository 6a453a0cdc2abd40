//! The delivery channel seam.

use async_trait::async_trait;
use marginalia_core::{ConversationId, Render};
use marginalia_error::TransportError;

/// Outbound side of a chat transport.
///
/// The dialogue layer produces [`Render`] values and never sees a concrete
/// chat platform; an implementation of this trait adapts one, turning a
/// render into whatever message-plus-buttons shape the platform speaks.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Deliver one render to a conversation.
    async fn deliver(
        &self,
        conversation: ConversationId,
        render: Render,
    ) -> Result<(), TransportError>;
}
