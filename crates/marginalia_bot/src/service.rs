//! Dispatch: inbound interaction in, render delivered out.

use crate::{BotConfig, DeliveryChannel};
use marginalia_core::{ConversationId, Interaction};
use marginalia_dialogue::Dialogue;
use marginalia_error::MarginaliaResult;
use marginalia_storage::StorageEngine;
use tracing::instrument;

/// The bot service: one dialogue state machine behind one delivery channel.
pub struct BotService<C> {
    dialogue: Dialogue,
    channel: C,
}

impl<C: DeliveryChannel> BotService<C> {
    /// Wire an existing dialogue to a channel.
    pub fn new(dialogue: Dialogue, channel: C) -> Self {
        Self { dialogue, channel }
    }

    /// Open storage per the configuration and wire up a service.
    pub fn from_config(config: &BotConfig, channel: C) -> MarginaliaResult<Self> {
        let storage = StorageEngine::open(&config.database_url())?;
        let dialogue = Dialogue::with_session_config(storage, config.session().into());
        Ok(Self::new(dialogue, channel))
    }

    /// The dialogue behind this service.
    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }

    /// Handle one inbound interaction and deliver the resulting render.
    ///
    /// Delivery failures are logged and dropped, never retried: the
    /// dialogue state has already advanced and the user can resend.
    #[instrument(skip(self, interaction), fields(user = %interaction.user()))]
    pub async fn dispatch(
        &self,
        conversation: ConversationId,
        interaction: &Interaction,
    ) -> MarginaliaResult<()> {
        let render = self.dialogue.handle(interaction)?;
        if let Err(err) = self.channel.deliver(conversation, render).await {
            tracing::error!(error = %err, %conversation, "render delivery failed");
        }
        Ok(())
    }
}
