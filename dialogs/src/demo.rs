//! Root dialog: greet, resolve the name, then loop on a suggested-actions prompt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::DialogContext;
use crate::error::DialogError;
use crate::name::NameDialog;
use crate::runtime::{Dialog, DialogResult, Frame, Step};

pub const GREETING: &str =
    "Hello!\nI'm just a demo bot!\nAll I do is ask for your name, but you can make me smarter!";
pub const SUGGESTED_ACTIONS_PROMPT: &str = "Type (or click) 'Lets go!' to get started.";
pub const ACCEPT_ACTION: &str = "Let's go!";
pub const DECLINE_ACTION: &str = "Lets....not(?) go!";
pub const SUCCESS_MESSAGE: &str = "Nice! You did it.";
pub const WRONG_MESSAGE: &str = "That's the wrong message!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum DemoState {
    #[default]
    AwaitingFirstMessage,
    ResolvingName,
    AwaitingGo,
}

/// Greets, calls [`NameDialog`], acknowledges the name, then re-shows the suggested actions
/// until the reply is exactly [`ACCEPT_ACTION`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DemoDialog {
    state: DemoState,
}

impl DemoDialog {
    pub fn new() -> Self {
        Self::default()
    }

    fn show_suggested_actions(&mut self, ctx: &mut DialogContext) -> Step {
        ctx.post_suggested_actions(SUGGESTED_ACTIONS_PROMPT, [ACCEPT_ACTION, DECLINE_ACTION]);
        self.state = DemoState::AwaitingGo;
        Step::Wait
    }
}

#[async_trait]
impl Dialog for DemoDialog {
    fn name(&self) -> &'static str {
        "DemoDialog"
    }

    async fn start(&mut self, _ctx: &mut DialogContext) -> Result<Step, DialogError> {
        self.state = DemoState::AwaitingFirstMessage;
        Ok(Step::Wait)
    }

    async fn on_message(&mut self, ctx: &mut DialogContext, text: &str) -> Result<Step, DialogError> {
        match self.state {
            DemoState::AwaitingFirstMessage => {
                ctx.post(GREETING);
                self.state = DemoState::ResolvingName;
                Ok(Step::Call(Frame::Name(NameDialog::new())))
            }
            DemoState::AwaitingGo if text == ACCEPT_ACTION => {
                info!(user_id = ctx.user_id(), "Suggested action accepted");
                ctx.post(SUCCESS_MESSAGE);
                Ok(Step::Done(DialogResult::None))
            }
            DemoState::AwaitingGo => {
                ctx.post(WRONG_MESSAGE);
                Ok(self.show_suggested_actions(ctx))
            }
            DemoState::ResolvingName => Err(DialogError::UnexpectedMessage(self.name())),
        }
    }

    async fn resume(
        &mut self,
        ctx: &mut DialogContext,
        result: DialogResult,
    ) -> Result<Step, DialogError> {
        match (self.state, result) {
            (DemoState::ResolvingName, DialogResult::Text(name)) => {
                ctx.post(format!("I've got your name saved as {}.", name));
                Ok(self.show_suggested_actions(ctx))
            }
            (_, result) => Err(DialogError::UnexpectedResult {
                dialog: self.name(),
                result: format!("{:?}", result),
            }),
        }
    }
}
