//! # dialogs
//!
//! A small dialog runtime (serializable dialog stack, wait / call / done steps, text and confirm
//! prompts) and the two dialogs of the bot:
//!
//! - [`DemoDialog`]: greets the user, resolves their name via [`NameDialog`], then loops on a
//!   suggested-actions prompt until the user answers "Let's go!".
//! - [`NameDialog`]: returns the stored preferred name, or confirms the channel name, or asks.
//!
//! [`DialogHandler`] plugs the runtime into the handler chain: one turn per inbound message.

mod context;
mod demo;
mod error;
mod handler;
mod name;
mod prompts;
mod runtime;

pub use context::DialogContext;
pub use demo::DemoDialog;
pub use error::DialogError;
pub use handler::DialogHandler;
pub use name::{is_generic_name, suggested_name, NameDialog};
pub use prompts::{parse_confirmation, ConfirmPrompt, TextPrompt, CONFIRM_NO, CONFIRM_YES};
pub use runtime::{Dialog, DialogResult, DialogStack, Frame, Step};

/// Fixed texts posted by the dialogs.
pub mod texts {
    pub use crate::demo::{
        ACCEPT_ACTION, DECLINE_ACTION, GREETING, SUCCESS_MESSAGE, SUGGESTED_ACTIONS_PROMPT,
        WRONG_MESSAGE,
    };
    pub use crate::name::{ASK_NAME, ASK_NAME_AFTER_DECLINE, ASK_NAME_RETRY};
}
