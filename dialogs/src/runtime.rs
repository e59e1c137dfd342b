//! Dialog runtime: the [`Dialog`] trait, [`Step`]s, and the per-conversation [`DialogStack`].
//!
//! A turn delivers one message to the dialog on top of the stack, then keeps applying the
//! returned steps until some dialog waits or the stack runs empty:
//!
//! - `Wait`: suspend; the same dialog gets the next message.
//! - `Call(frame)`: push `frame` and start it.
//! - `Done(result)`: pop the finished dialog and resume its parent with `result`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::DialogContext;
use crate::demo::DemoDialog;
use crate::error::DialogError;
use crate::name::NameDialog;
use crate::prompts::{ConfirmPrompt, TextPrompt};

/// Value a finished dialog hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    None,
    Text(String),
    Confirmed(bool),
}

/// What the runtime does after a dialog step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Wait,
    Call(Frame),
    Done(DialogResult),
}

/// A unit of conversational logic that can suspend awaiting a message and resume.
#[async_trait]
pub trait Dialog: Send {
    /// Type name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Runs when the dialog is pushed.
    async fn start(&mut self, ctx: &mut DialogContext) -> Result<Step, DialogError>;

    /// Runs when a message arrives while this dialog is on top and waiting.
    async fn on_message(
        &mut self,
        _ctx: &mut DialogContext,
        _text: &str,
    ) -> Result<Step, DialogError> {
        Err(DialogError::UnexpectedMessage(self.name()))
    }

    /// Runs when a child dialog finishes.
    async fn resume(
        &mut self,
        _ctx: &mut DialogContext,
        result: DialogResult,
    ) -> Result<Step, DialogError> {
        Err(DialogError::UnexpectedResult {
            dialog: self.name(),
            result: format!("{:?}", result),
        })
    }
}

/// Serializable dialog frame; one variant per dialog type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dialog", rename_all = "snake_case")]
pub enum Frame {
    Demo(DemoDialog),
    Name(NameDialog),
    TextPrompt(TextPrompt),
    ConfirmPrompt(ConfirmPrompt),
}

impl Frame {
    fn dialog(&mut self) -> &mut dyn Dialog {
        match self {
            Frame::Demo(d) => d,
            Frame::Name(d) => d,
            Frame::TextPrompt(d) => d,
            Frame::ConfirmPrompt(d) => d,
        }
    }
}

/// Active dialogs of one conversation, bottom (root) to top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogStack {
    frames: Vec<Frame>,
}

impl DialogStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Runs one turn for the message in `ctx`. An empty stack first starts `root()`.
    pub async fn turn<F>(&mut self, ctx: &mut DialogContext, root: F) -> Result<(), DialogError>
    where
        F: FnOnce() -> Frame + Send,
    {
        if self.frames.is_empty() {
            let mut frame = root();
            let step = frame.dialog().start(ctx).await?;
            debug!(dialog = frame.dialog().name(), "Root dialog started");
            self.frames.push(frame);
            self.apply(ctx, step).await?;
            if self.frames.is_empty() {
                return Ok(());
            }
        }

        let text = ctx.message().content.clone();
        let top = self.frames.last_mut().ok_or(DialogError::EmptyStack)?;
        let step = top.dialog().on_message(ctx, &text).await?;
        self.apply(ctx, step).await
    }

    async fn apply(&mut self, ctx: &mut DialogContext, mut step: Step) -> Result<(), DialogError> {
        loop {
            match step {
                Step::Wait => return Ok(()),
                Step::Call(mut child) => {
                    debug!(dialog = child.dialog().name(), depth = self.frames.len(), "Calling dialog");
                    let next = child.dialog().start(ctx).await?;
                    self.frames.push(child);
                    step = next;
                }
                Step::Done(result) => {
                    if let Some(mut finished) = self.frames.pop() {
                        debug!(dialog = finished.dialog().name(), result = ?result, "Dialog done");
                    }
                    match self.frames.last_mut() {
                        Some(parent) => step = parent.dialog().resume(ctx, result).await?,
                        None => return Ok(()),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::TextPrompt;

    #[test]
    fn test_stack_json_round_trip() {
        let stack = DialogStack {
            frames: vec![
                Frame::Demo(DemoDialog::new()),
                Frame::Name(NameDialog::new()),
                Frame::TextPrompt(TextPrompt::new("What?", "Again?")),
            ],
        };

        let json = serde_json::to_string(&stack).unwrap();
        assert!(json.contains(r#""dialog":"text_prompt""#));
        let restored: DialogStack = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, stack);
        assert_eq!(restored.depth(), 3);
    }

    #[test]
    fn test_new_stack_is_empty() {
        let stack = DialogStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
    }
}
