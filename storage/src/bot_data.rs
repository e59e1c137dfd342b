//! Preferred-name accessor over the user data store.

use std::sync::Arc;

use crate::error::StorageError;
use crate::user_data::UserDataStore;

/// User data key holding the name the bot should call the user.
pub const PREFERRED_FIRST_NAME: &str = "preferred_first_name";

/// Thin get/set pass-through for the preferred first name. No validation; the store decides
/// consistency.
#[derive(Clone)]
pub struct BotDataService {
    store: Arc<dyn UserDataStore>,
}

impl BotDataService {
    pub fn new(store: Arc<dyn UserDataStore>) -> Self {
        Self { store }
    }

    pub async fn get_preferred_name(&self, user_id: i64) -> Result<Option<String>, StorageError> {
        self.store.get_value(user_id, PREFERRED_FIRST_NAME).await
    }

    pub async fn set_preferred_name(&self, user_id: i64, name: &str) -> Result<(), StorageError> {
        self.store
            .set_value(user_id, PREFERRED_FIRST_NAME, name)
            .await
    }
}
