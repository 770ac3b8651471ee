use std::sync::Arc;

use super::{AccountError, CURRENT_USER_KEY};
use crate::storage::KeyValueStore;

/// Pointer to the logged-in user, stored as the raw id string.
#[derive(Clone)]
pub struct SessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn set_current_user_id(&self, user_id: &str) -> Result<(), AccountError> {
        self.store.set(CURRENT_USER_KEY, user_id)?;
        Ok(())
    }

    pub fn get_current_user_id(&self) -> Result<Option<String>, AccountError> {
        let id = self.store.get(CURRENT_USER_KEY)?;
        Ok(id.filter(|id| !id.is_empty()))
    }

    pub fn clear_current_user(&self) -> Result<(), AccountError> {
        self.store.remove(CURRENT_USER_KEY)?;
        Ok(())
    }
}
