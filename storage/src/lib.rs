//! Storage crate: per-user data and per-conversation dialog state.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`sqlite_pool`] – SqlitePoolManager
//! - [`user_data`] – UserDataStore trait with SQLite and in-memory implementations
//! - [`bot_data`] – BotDataService, the preferred-name accessor used by dialogs
//! - [`dialog_state`] – DialogStateStore trait with SQLite and in-memory implementations

mod bot_data;
mod dialog_state;
mod error;
mod sqlite_pool;
mod user_data;

pub use bot_data::{BotDataService, PREFERRED_FIRST_NAME};
pub use dialog_state::{DialogStateStore, InMemoryDialogStateStore, SqliteDialogStateStore};
pub use error::StorageError;
pub use sqlite_pool::SqlitePoolManager;
pub use user_data::{InMemoryUserDataStore, SqliteUserDataStore, UserDataStore};
