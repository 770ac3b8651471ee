use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use super::{AccountError, USERS_KEY};
use crate::clock::Clock;
use crate::models::users;
use crate::storage::KeyValueStore;

const ID_PREFIX: &str = "u";
const ID_LENGTH: usize = 8;

/// All user records, kept as one JSON array under [`USERS_KEY`].
///
/// Every mutation reads the whole collection and writes it back. This is
/// only sound with a single writer, which the user service guarantees.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn load_users(&self) -> Result<Vec<users::User>, AccountError> {
        let raw = match self.store.get(USERS_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                log::error!("Failed to parse stored users, starting empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save_users(&self, users: &[users::User]) -> Result<(), AccountError> {
        let raw = serde_json::to_string(users)
            .map_err(|e| crate::storage::StorageError::Serialize(e.to_string()))?;
        self.store.set(USERS_KEY, &raw)?;

        Ok(())
    }

    pub fn insert_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<users::User, AccountError> {
        let mut all_users = self.load_users()?;

        if all_users.iter().any(|user| user.email_matches(email)) {
            return Err(AccountError::DuplicateEmail);
        }

        let user = users::User::new(
            generate_id(&all_users),
            name.to_string(),
            email.to_string(),
            password.to_string(),
            self.clock.now(),
        );

        all_users.push(user.clone());
        self.save_users(&all_users)?;

        log::info!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub fn get_user_by_id(&self, user_id: &str) -> Result<Option<users::User>, AccountError> {
        if user_id.is_empty() {
            return Ok(None);
        }

        let user = self
            .load_users()?
            .into_iter()
            .find(|user| user.id == user_id);

        Ok(user)
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<users::User>, AccountError> {
        let user = self
            .load_users()?
            .into_iter()
            .find(|user| user.email_matches(email));

        Ok(user)
    }

    /// Replaces the record with the same id, or appends it.
    pub fn upsert_user(&self, user: &users::User) -> Result<(), AccountError> {
        let mut all_users = self.load_users()?;

        match all_users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => all_users.push(user.clone()),
        }

        self.save_users(&all_users)
    }

    pub fn check_in(&self, user_id: &str, date: NaiveDate) -> Result<users::User, AccountError> {
        let mut user = self
            .get_user_by_id(user_id)?
            .ok_or_else(|| AccountError::RecordNotFound(user_id.to_string()))?;

        if !user.record_check_in(date) {
            return Err(AccountError::AlreadyCheckedIn(date));
        }

        self.upsert_user(&user)?;
        Ok(user)
    }

    pub fn set_has_pay_id(&self, user_id: &str) -> Result<users::User, AccountError> {
        let mut user = self
            .get_user_by_id(user_id)?
            .ok_or_else(|| AccountError::RecordNotFound(user_id.to_string()))?;

        user.has_pay_id = Some(true);
        self.upsert_user(&user)?;

        Ok(user)
    }
}

fn generate_id(existing: &[users::User]) -> String {
    loop {
        let random = Uuid::new_v4().simple().to_string();
        let id = format!("{}{}", ID_PREFIX, &random[..ID_LENGTH]);

        if !existing.iter().any(|user| user.id == id) {
            return id;
        }
    }
}
