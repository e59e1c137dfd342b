//! Per-turn context handed to every dialog step.

use bot_core::{Activity, Message};
use storage::BotDataService;

/// What a dialog can see and do during one turn: the inbound message, the user data accessor,
/// and an outbox of activities sent after the turn completes.
pub struct DialogContext {
    message: Message,
    bot_data: BotDataService,
    outbox: Vec<Activity>,
}

impl DialogContext {
    pub fn new(message: Message, bot_data: BotDataService) -> Self {
        Self {
            message,
            bot_data,
            outbox: Vec::new(),
        }
    }

    /// The message that triggered this turn.
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn user_id(&self) -> i64 {
        self.message.user.id
    }

    pub fn bot_data(&self) -> &BotDataService {
        &self.bot_data
    }

    /// Queues a plain text post.
    pub fn post(&mut self, text: impl Into<String>) {
        self.outbox.push(Activity::text(text));
    }

    /// Queues a text post with quick-reply buttons.
    pub fn post_suggested_actions<I, S>(&mut self, text: impl Into<String>, actions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outbox.push(Activity::suggested_actions(text, actions));
    }

    /// Drains the queued activities in post order.
    pub fn take_activities(&mut self) -> Vec<Activity> {
        std::mem::take(&mut self.outbox)
    }
}
