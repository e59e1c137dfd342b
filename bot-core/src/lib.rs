//! # bot-core
//!
//! Core types and traits for namebot: [`Bot`], [`Handler`], message and user types, outbound
//! [`Activity`], and tracing initialization. Transport-agnostic; used by handler-chain, dialogs,
//! bot-telegram and the CLI console channel.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Activity, Bot};
pub use error::{BotError, HandlerError, Result};
pub use logger::{init_file_tracing, init_tracing};
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreMessage, ToCoreUser, User,
};
