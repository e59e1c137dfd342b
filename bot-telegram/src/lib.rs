//! # bot-telegram
//!
//! Telegram transport: adapters to core types, [`bot_core::Bot`] implementation (suggested actions
//! become a reply keyboard), minimal config, REPL runner. Knows nothing about dialogs.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{suggested_actions_keyboard, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::{handle_telegram_message, run_repl};
