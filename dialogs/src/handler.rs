//! Chain handler that runs one dialog turn per inbound message.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Bot, BotError, Handler, HandlerError, HandlerResponse, Message, Result};
use storage::{BotDataService, DialogStateStore};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::context::DialogContext;
use crate::demo::DemoDialog;
use crate::runtime::{DialogStack, Frame};

/// Loads the conversation's dialog stack, runs a turn, persists the stack and sends the
/// produced activities. Turns of one conversation never overlap; different conversations run
/// concurrently.
pub struct DialogHandler {
    bot: Arc<dyn Bot>,
    bot_data: BotDataService,
    state_store: Arc<dyn DialogStateStore>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DialogHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_data: BotDataService,
        state_store: Arc<dyn DialogStateStore>,
    ) -> Self {
        Self {
            bot,
            bot_data,
            state_store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn conversation_lock(&self, conversation_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .await
            .entry(conversation_id.to_string())
            .or_default()
            .clone()
    }

    /// Drops the map entry once nothing but the map and `lock` refer to it. New holders only
    /// clone under the map lock, so the count cannot rise while it is checked.
    async fn release_lock(&self, conversation_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        if Arc::strong_count(&lock) == 2 {
            locks.remove(conversation_id);
        }
    }

    async fn load_stack(&self, conversation_id: &str) -> Result<DialogStack> {
        let saved = self
            .state_store
            .load(conversation_id)
            .await
            .map_err(|e| BotError::Database(e.to_string()))?;
        let Some(json) = saved else {
            return Ok(DialogStack::new());
        };
        match serde_json::from_str(&json) {
            Ok(stack) => Ok(stack),
            Err(e) => {
                warn!(
                    conversation_id = %conversation_id,
                    error = %e,
                    "Saved dialog stack is unreadable, restarting conversation"
                );
                Ok(DialogStack::new())
            }
        }
    }

    async fn save_stack(&self, conversation_id: &str, stack: &DialogStack) -> Result<()> {
        let result = if stack.is_empty() {
            self.state_store.clear(conversation_id).await
        } else {
            let json = serde_json::to_string(stack)
                .map_err(|e| HandlerError::State(format!("serialize dialog stack: {}", e)))?;
            self.state_store.save(conversation_id, &json).await
        };
        result.map_err(|e| BotError::Database(e.to_string()))
    }

    async fn run_turn(&self, message: &Message, conversation_id: &str) -> Result<HandlerResponse> {
        let mut stack = self.load_stack(conversation_id).await?;
        let mut ctx = DialogContext::new(message.clone(), self.bot_data.clone());

        stack
            .turn(&mut ctx, || Frame::Demo(DemoDialog::new()))
            .await
            .map_err(|e| {
                error!(error = %e, user_id = message.user.id, "Dialog turn failed");
                BotError::Dialog(e.to_string())
            })?;

        self.save_stack(conversation_id, &stack).await?;

        let activities = ctx.take_activities();
        info!(
            user_id = message.user.id,
            depth = stack.depth(),
            activities = activities.len(),
            "step: dialog turn done"
        );
        for activity in &activities {
            self.bot.send_activity(&message.chat, activity).await?;
        }

        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for DialogHandler {
    #[instrument(skip(self, message), fields(conversation_id = %message.conversation_id()))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let conversation_id = message.conversation_id();
        let lock = self.conversation_lock(&conversation_id).await;
        let result = {
            let _turn = lock.lock().await;
            self.run_turn(message, &conversation_id).await
        };
        self.release_lock(&conversation_id, lock).await;
        result
    }
}
