//! Bot abstraction for posting activities back to the user.
//!
//! [`Bot`] is transport-agnostic; bot-telegram implements it via teloxide and the CLI implements it
//! for the local console.

use crate::error::Result;
use crate::types::Chat;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One outbound post produced by a dialog turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    /// Plain text message.
    Text(String),
    /// Text with quick-reply buttons; each action is sent back verbatim when clicked.
    SuggestedActions { text: String, actions: Vec<String> },
}

impl Activity {
    pub fn text(text: impl Into<String>) -> Self {
        Activity::Text(text.into())
    }

    pub fn suggested_actions<I, S>(text: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Activity::SuggestedActions {
            text: text.into(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// The text body, regardless of kind.
    pub fn body(&self) -> &str {
        match self {
            Activity::Text(text) => text,
            Activity::SuggestedActions { text, .. } => text,
        }
    }
}

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram, console).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a text message rendered with quick-reply buttons.
    async fn send_suggested_actions(&self, chat: &Chat, text: &str, actions: &[String])
        -> Result<()>;

    /// Dispatches an [`Activity`] to the matching send method.
    async fn send_activity(&self, chat: &Chat, activity: &Activity) -> Result<()> {
        match activity {
            Activity::Text(text) => self.send_message(chat, text).await,
            Activity::SuggestedActions { text, actions } => {
                self.send_suggested_actions(chat, text, actions).await
            }
        }
    }
}
