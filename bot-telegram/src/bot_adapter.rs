//! Wraps teloxide::Bot and implements [`bot_core::Bot`].

use async_trait::async_trait;
use bot_core::{Bot as CoreBot, BotError, Chat, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, KeyboardButton, KeyboardMarkup, KeyboardRemove},
};

/// One-row reply keyboard; tapping a button sends its label as a message.
pub fn suggested_actions_keyboard(actions: &[String]) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![actions
        .iter()
        .map(|action| KeyboardButton::new(action.clone()))
        .collect::<Vec<_>>()])
    .resize_keyboard()
    .one_time_keyboard()
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(KeyboardRemove::new())
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_suggested_actions(
        &self,
        chat: &Chat,
        text: &str,
        actions: &[String],
    ) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(suggested_actions_keyboard(actions))
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_has_one_row_in_order() {
        let keyboard =
            suggested_actions_keyboard(&["Let's go!".to_string(), "Lets....not(?) go!".to_string()]);

        assert_eq!(keyboard.keyboard.len(), 1);
        let labels: Vec<&str> = keyboard.keyboard[0]
            .iter()
            .map(|button| button.text.as_str())
            .collect();
        assert_eq!(labels, vec!["Let's go!", "Lets....not(?) go!"]);
    }

    #[test]
    fn test_adapter_new() {
        let _adapter = TelegramBotAdapter::new(teloxide::Bot::new("dummy_token"));
    }
}
