//! # bot-cli
//!
//! The `namebot` binary: argument parsing, env config, store selection, and wiring of the handler
//! chain to either Telegram or the local console.

pub mod app;
pub mod cli;
pub mod config;
pub mod console;

pub use app::{build_handler_chain, open_stores, run_telegram, Stores};
pub use cli::{Cli, Commands};
pub use config::{AppConfig, StoreType};
pub use console::{render_activity, run_console, ConsoleBot};
