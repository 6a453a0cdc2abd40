//! Service dispatch and configuration tests.

use async_trait::async_trait;
use marginalia_bot::{BotConfig, BotService, DeliveryChannel};
use marginalia_core::{ConversationId, CorrelationToken, Interaction, Render, UserId};
use marginalia_dialogue::Dialogue;
use marginalia_error::TransportError;
use marginalia_storage::StorageEngine;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Default)]
struct RecordingChannel {
    delivered: Arc<Mutex<Vec<(ConversationId, Render)>>>,
}

#[async_trait]
impl DeliveryChannel for RecordingChannel {
    async fn deliver(
        &self,
        conversation: ConversationId,
        render: Render,
    ) -> Result<(), TransportError> {
        self.delivered.lock().push((conversation, render));
        Ok(())
    }
}

struct FailingChannel;

#[async_trait]
impl DeliveryChannel for FailingChannel {
    async fn deliver(&self, _: ConversationId, _: Render) -> Result<(), TransportError> {
        Err(TransportError::new("connection reset"))
    }
}

fn service<C: DeliveryChannel>(channel: C) -> BotService<C> {
    BotService::new(
        Dialogue::new(StorageEngine::open_in_memory().unwrap()),
        channel,
    )
}

#[tokio::test]
async fn dispatch_delivers_dialogue_renders() {
    let channel = RecordingChannel::default();
    let service = service(channel.clone());
    let user = UserId::from(11);
    let conversation = ConversationId::from(99);

    service
        .dispatch(
            conversation,
            &Interaction::command(
                user,
                CorrelationToken::from(1),
                "add_author",
                vec!["Gogol".to_string()],
            ),
        )
        .await
        .unwrap();

    let delivered = channel.delivered.lock();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, conversation);
    assert_eq!(delivered[0].1.text, "Add author \"Gogol\"?");
    assert!(delivered[0].1.keyboard.is_some());
}

#[tokio::test]
async fn delivery_failure_does_not_fail_dispatch() {
    let service = service(FailingChannel);
    let user = UserId::from(11);
    service
        .dispatch(
            ConversationId::from(1),
            &Interaction::command(user, CorrelationToken::from(1), "start", vec![]),
        )
        .await
        .unwrap();
}

#[test]
fn config_parses_toml_with_session_defaults() {
    let dir = std::env::temp_dir().join("marginalia_bot_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bot.toml");
    std::fs::write(&path, "[database]\nurl = \"diary.sqlite\"\n").unwrap();

    let config = BotConfig::from_file(&path).unwrap();
    assert_eq!(config.database().url(), "diary.sqlite");
    assert_eq!(*config.session().ttl_secs(), 3600);
}

#[test]
fn config_missing_file_is_an_error() {
    assert!(BotConfig::from_file("/nonexistent/marginalia/bot.toml").is_err());
}
