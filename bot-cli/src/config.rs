//! App config: storage and logging. Loaded from env (after dotenvy); Telegram settings live in
//! [`bot_telegram::TelegramConfig`].

use anyhow::Result;
use std::env;
use std::str::FromStr;

/// Backend for user data and dialog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Sqlite,
    Memory,
}

impl FromStr for StoreType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StoreType::Sqlite),
            "memory" => Ok(StoreType::Memory),
            other => anyhow::bail!("STORE_TYPE must be 'sqlite' or 'memory', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// DATABASE_URL
    pub database_url: String,
    /// STORE_TYPE: sqlite | memory
    pub store_type: String,
    /// LOG_FILE
    pub log_file: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./namebot.db".to_string());
        let store_type = env::var("STORE_TYPE").unwrap_or_else(|_| "sqlite".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/namebot.log".to_string());

        Ok(Self {
            database_url,
            store_type,
            log_file,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        if self.store_type()? == StoreType::Sqlite && !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must be a sqlite: URL, got '{}'",
                self.database_url
            );
        }
        Ok(())
    }

    pub fn store_type(&self) -> Result<StoreType> {
        self.store_type.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("DATABASE_URL");
        env::remove_var("STORE_TYPE");
        env::remove_var("LOG_FILE");
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();

        let config = AppConfig::load().unwrap();

        assert_eq!(config.database_url, "sqlite:./namebot.db");
        assert_eq!(config.store_type().unwrap(), StoreType::Sqlite);
        assert_eq!(config.log_file, "logs/namebot.log");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        clear_env();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("STORE_TYPE", "Memory");
        env::set_var("LOG_FILE", "/tmp/namebot-test.log");

        let config = AppConfig::load().unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.store_type().unwrap(), StoreType::Memory);
        assert_eq!(config.log_file, "/tmp/namebot-test.log");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_unknown_store_type() {
        clear_env();
        env::set_var("STORE_TYPE", "redis");

        let config = AppConfig::load().unwrap();
        assert!(config.validate().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_non_sqlite_url() {
        clear_env();
        env::set_var("DATABASE_URL", "postgres://localhost/bot");

        let config = AppConfig::load().unwrap();
        assert!(config.validate().is_err());

        clear_env();
    }
}
