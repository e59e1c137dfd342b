//! Mock implementation of [`bot_core::Bot`] for dialog tests.
//!
//! Records every activity per chat so tests can assert on exactly what the user would see.

use async_trait::async_trait;
use bot_core::{Activity, Bot, Chat, Result};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<(i64, Activity)>>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and forgets everything sent so far.
    pub fn take(&self) -> Vec<Activity> {
        self.sent
            .lock()
            .unwrap()
            .drain(..)
            .map(|(_, activity)| activity)
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat.id, Activity::text(text)));
        Ok(())
    }

    async fn send_suggested_actions(
        &self,
        chat: &Chat,
        text: &str,
        actions: &[String],
    ) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat.id, Activity::suggested_actions(text, actions.iter().cloned())));
        Ok(())
    }
}
