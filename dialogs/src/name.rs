//! Works out what to call the user.
//!
//! A stored preferred name wins outright. Otherwise the first word of the channel's display name
//! is offered for confirmation, unless it looks like a placeholder ("User42", "webchat user"), in
//! which case the user is asked directly. Whatever the user confirms or types is stored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::DialogContext;
use crate::error::DialogError;
use crate::prompts::{ConfirmPrompt, TextPrompt};
use crate::runtime::{Dialog, DialogResult, Frame, Step};

pub const ASK_NAME: &str = "What should I call you?";
pub const ASK_NAME_AFTER_DECLINE: &str = "Okay, what should I call you?";
pub const ASK_NAME_RETRY: &str = "Sorry I didn't get that - try again! What should I call you?";

/// First whitespace-delimited token of the display name, if any.
pub fn suggested_name(display_name: Option<&str>) -> Option<String> {
    display_name?.split_whitespace().next().map(str::to_string)
}

/// Channels without real names report something like "User" or "user-1a2b".
pub fn is_generic_name(name: &str) -> bool {
    name.to_lowercase().contains("user")
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
enum NameState {
    #[default]
    CheckStore,
    ConfirmSuggested {
        suggested: String,
    },
    PromptText,
}

/// Resolves the user's preferred name; finishes with [`DialogResult::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameDialog {
    state: NameState,
}

impl NameDialog {
    pub fn new() -> Self {
        Self::default()
    }

    fn ask(&mut self, prompt: &str) -> Step {
        self.state = NameState::PromptText;
        Step::Call(Frame::TextPrompt(TextPrompt::new(prompt, ASK_NAME_RETRY)))
    }

    async fn store(&self, ctx: &DialogContext, name: String) -> Result<Step, DialogError> {
        ctx.bot_data()
            .set_preferred_name(ctx.user_id(), &name)
            .await?;
        info!(user_id = ctx.user_id(), name = %name, "Preferred name saved");
        Ok(Step::Done(DialogResult::Text(name)))
    }
}

#[async_trait]
impl Dialog for NameDialog {
    fn name(&self) -> &'static str {
        "NameDialog"
    }

    async fn start(&mut self, ctx: &mut DialogContext) -> Result<Step, DialogError> {
        let stored = ctx.bot_data().get_preferred_name(ctx.user_id()).await?;
        if let Some(name) = stored.filter(|name| !name.trim().is_empty()) {
            info!(user_id = ctx.user_id(), "Preferred name found in store");
            return Ok(Step::Done(DialogResult::Text(name)));
        }

        let display_name = ctx.message().user.display_name();
        match suggested_name(display_name.as_deref()) {
            Some(suggested) if !is_generic_name(&suggested) => {
                let prompt = ConfirmPrompt::new(
                    format!("Should I call you {}?", suggested),
                    format!(
                        "Sorry I don't understand - try again! Should I call you {}?",
                        suggested
                    ),
                );
                self.state = NameState::ConfirmSuggested { suggested };
                Ok(Step::Call(Frame::ConfirmPrompt(prompt)))
            }
            _ => Ok(self.ask(ASK_NAME)),
        }
    }

    async fn resume(
        &mut self,
        ctx: &mut DialogContext,
        result: DialogResult,
    ) -> Result<Step, DialogError> {
        match (self.state.clone(), result) {
            (NameState::ConfirmSuggested { suggested }, DialogResult::Confirmed(true)) => {
                self.store(ctx, suggested).await
            }
            (NameState::ConfirmSuggested { .. }, DialogResult::Confirmed(false)) => {
                Ok(self.ask(ASK_NAME_AFTER_DECLINE))
            }
            (NameState::PromptText, DialogResult::Text(name)) => self.store(ctx, name).await,
            (_, result) => Err(DialogError::UnexpectedResult {
                dialog: self.name(),
                result: format!("{:?}", result),
            }),
        }
    }
}
