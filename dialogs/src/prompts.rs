//! Built-in prompts: open text entry and yes/no confirmation. Both re-prompt with their retry
//! text on invalid input, without an attempt limit.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::DialogContext;
use crate::error::DialogError;
use crate::runtime::{Dialog, DialogResult, Step};

pub const CONFIRM_YES: &str = "Yes";
pub const CONFIRM_NO: &str = "No";

const YES_WORDS: &[&str] = &["yes", "y", "yep", "yeah", "sure", "ok", "okay", "1"];
const NO_WORDS: &[&str] = &["no", "n", "nope", "nah", "2"];

/// Maps a reply to a yes/no answer (case-insensitive, surrounding whitespace ignored).
pub fn parse_confirmation(text: &str) -> Option<bool> {
    let answer = text.trim().to_lowercase();
    if YES_WORDS.contains(&answer.as_str()) {
        Some(true)
    } else if NO_WORDS.contains(&answer.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Asks for free text; completes with the raw reply once it has any non-whitespace content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPrompt {
    prompt: String,
    retry: String,
}

impl TextPrompt {
    pub fn new(prompt: impl Into<String>, retry: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            retry: retry.into(),
        }
    }
}

#[async_trait]
impl Dialog for TextPrompt {
    fn name(&self) -> &'static str {
        "TextPrompt"
    }

    async fn start(&mut self, ctx: &mut DialogContext) -> Result<Step, DialogError> {
        ctx.post(self.prompt.clone());
        Ok(Step::Wait)
    }

    async fn on_message(&mut self, ctx: &mut DialogContext, text: &str) -> Result<Step, DialogError> {
        if text.trim().is_empty() {
            ctx.post(self.retry.clone());
            return Ok(Step::Wait);
        }
        Ok(Step::Done(DialogResult::Text(text.to_string())))
    }
}

/// Asks a yes/no question with Yes/No buttons; completes with [`DialogResult::Confirmed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPrompt {
    prompt: String,
    retry: String,
}

impl ConfirmPrompt {
    pub fn new(prompt: impl Into<String>, retry: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            retry: retry.into(),
        }
    }
}

#[async_trait]
impl Dialog for ConfirmPrompt {
    fn name(&self) -> &'static str {
        "ConfirmPrompt"
    }

    async fn start(&mut self, ctx: &mut DialogContext) -> Result<Step, DialogError> {
        ctx.post_suggested_actions(self.prompt.clone(), [CONFIRM_YES, CONFIRM_NO]);
        Ok(Step::Wait)
    }

    async fn on_message(&mut self, ctx: &mut DialogContext, text: &str) -> Result<Step, DialogError> {
        match parse_confirmation(text) {
            Some(answer) => Ok(Step::Done(DialogResult::Confirmed(answer))),
            None => {
                ctx.post_suggested_actions(self.retry.clone(), [CONFIRM_YES, CONFIRM_NO]);
                Ok(Step::Wait)
            }
        }
    }
}
