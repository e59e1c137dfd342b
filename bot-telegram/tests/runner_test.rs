//! Tests for [`bot_telegram::handle_telegram_message`] driving a real dialog chain.
//!
//! Messages of one chat sent back to back must reach the dialogs in arrival order.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Bot, Chat, Result};
use bot_telegram::handle_telegram_message;
use dialogs::DialogHandler;
use handler_chain::HandlerChain;
use storage::{
    BotDataService, InMemoryDialogStateStore, InMemoryUserDataStore, UserDataStore,
    PREFERRED_FIRST_NAME,
};

struct SilentBot;

#[async_trait]
impl Bot for SilentBot {
    async fn send_message(&self, _chat: &Chat, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn send_suggested_actions(
        &self,
        _chat: &Chat,
        _text: &str,
        _actions: &[String],
    ) -> Result<()> {
        Ok(())
    }
}

fn text_message(message_id: i32, user_id: i64, text: &str) -> teloxide::types::Message {
    serde_json::from_value(serde_json::json!({
        "message_id": message_id,
        "date": 1_700_000_000,
        "chat": { "id": user_id, "type": "private", "first_name": "Alice" },
        "from": { "id": user_id, "is_bot": false, "first_name": "Alice", "last_name": "Smith" },
        "text": text,
    }))
    .unwrap()
}

/// **Test: "no" then "Al" sent back to back always store "Al".**
///
/// Runs many conversations on a multi-thread runtime; every one must see the decline before the
/// typed name.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_back_to_back_messages_keep_order() {
    let users = Arc::new(InMemoryUserDataStore::new());
    let handler = DialogHandler::new(
        Arc::new(SilentBot),
        BotDataService::new(users.clone()),
        Arc::new(InMemoryDialogStateStore::new()),
    );
    let chain = HandlerChain::new().add_handler(Arc::new(handler));

    for user_id in 1..=200 {
        handle_telegram_message(&chain, &text_message(1, user_id, "hi")).await;
        handle_telegram_message(&chain, &text_message(2, user_id, "no")).await;
        handle_telegram_message(&chain, &text_message(3, user_id, "Al")).await;
    }

    for user_id in 1..=200 {
        assert_eq!(
            users
                .get_value(user_id, PREFERRED_FIRST_NAME)
                .await
                .unwrap()
                .as_deref(),
            Some("Al"),
            "user {user_id}"
        );
    }
}
