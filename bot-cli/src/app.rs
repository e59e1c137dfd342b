//! Wiring: stores from config, the handler chain, and the Telegram runner.

use std::sync::Arc;

use anyhow::{Context, Result};
use bot_core::{init_tracing, Bot};
use bot_telegram::{run_repl, TelegramBotAdapter, TelegramConfig};
use dialogs::DialogHandler;
use handler_chain::{HandlerChain, LoggingHandler};
use storage::{
    BotDataService, DialogStateStore, InMemoryDialogStateStore, InMemoryUserDataStore,
    SqliteDialogStateStore, SqlitePoolManager, SqliteUserDataStore, UserDataStore,
};
use tracing::{info, instrument};

use crate::config::{AppConfig, StoreType};

/// Stores shared by every conversation.
#[derive(Clone)]
pub struct Stores {
    pub user_data: Arc<dyn UserDataStore>,
    pub dialog_state: Arc<dyn DialogStateStore>,
}

impl Stores {
    /// Both stores in memory; nothing survives a restart.
    pub fn in_memory() -> Self {
        Self {
            user_data: Arc::new(InMemoryUserDataStore::new()),
            dialog_state: Arc::new(InMemoryDialogStateStore::new()),
        }
    }
}

/// Opens the stores selected by STORE_TYPE. SQLite stores share one pool.
#[instrument(skip(config), fields(store_type = %config.store_type))]
pub async fn open_stores(config: &AppConfig) -> Result<Stores> {
    match config.store_type()? {
        StoreType::Memory => {
            info!("Using in-memory stores");
            Ok(Stores::in_memory())
        }
        StoreType::Sqlite => {
            info!(database_url = %config.database_url, "Using SQLite stores");
            let pool = SqlitePoolManager::new(&config.database_url)
                .await
                .with_context(|| format!("open database {}", config.database_url))?;
            let user_data = SqliteUserDataStore::new(pool.clone())
                .await
                .context("init user_data table")?;
            let dialog_state = SqliteDialogStateStore::new(pool)
                .await
                .context("init dialog_state table")?;
            Ok(Stores {
                user_data: Arc::new(user_data),
                dialog_state: Arc::new(dialog_state),
            })
        }
    }
}

/// Builds the chain: logging first, then the dialog handler, which answers every message.
pub fn build_handler_chain(bot: Arc<dyn Bot>, stores: &Stores) -> HandlerChain {
    let bot_data = BotDataService::new(stores.user_data.clone());
    let dialog_handler = DialogHandler::new(bot, bot_data, stores.dialog_state.clone());

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(dialog_handler))
}

/// Runs the Telegram bot until the REPL exits.
#[instrument(skip(config, token))]
pub async fn run_telegram(config: AppConfig, token: Option<String>) -> Result<()> {
    let telegram = TelegramConfig::from_env(token)?;
    telegram.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        store_type = %config.store_type,
        custom_api_url = telegram.telegram_api_url.is_some(),
        "Initializing bot"
    );

    let stores = open_stores(&config).await?;
    let teloxide_bot = telegram.build_bot()?;
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let handler_chain = build_handler_chain(adapter, &stores);

    info!("Bot started successfully");
    run_repl(teloxide_bot, handler_chain).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_stores() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            store_type: "memory".to_string(),
            log_file: "logs/test.log".to_string(),
        };
        let stores = open_stores(&config).await.unwrap();
        stores.user_data.set_value(1, "k", "v").await.unwrap();
        assert_eq!(
            stores.user_data.get_value(1, "k").await.unwrap().as_deref(),
            Some("v")
        );
    }

    #[tokio::test]
    async fn test_open_sqlite_stores_in_memory_db() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            store_type: "sqlite".to_string(),
            log_file: "logs/test.log".to_string(),
        };
        let stores = open_stores(&config).await.unwrap();
        stores.dialog_state.save("1:1", "[]").await.unwrap();
        assert_eq!(
            stores.dialog_state.load("1:1").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_chain_has_logging_and_dialog_handlers() {
        struct NullBot;

        #[async_trait::async_trait]
        impl Bot for NullBot {
            async fn send_message(&self, _: &bot_core::Chat, _: &str) -> bot_core::Result<()> {
                Ok(())
            }
            async fn send_suggested_actions(
                &self,
                _: &bot_core::Chat,
                _: &str,
                _: &[String],
            ) -> bot_core::Result<()> {
                Ok(())
            }
        }

        let chain = build_handler_chain(Arc::new(NullBot), &Stores::in_memory());
        assert_eq!(chain.len(), 2);
    }
}
