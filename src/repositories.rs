use crate::storage::StorageError;

pub mod session;
pub mod users;

pub const USERS_KEY: &str = "app_users_v3";
pub const CURRENT_USER_KEY: &str = "app_current_user_v3";

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("An account with this email already exists")]
    DuplicateEmail,
    #[error("Incorrect login credentials")]
    InvalidCredentials,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Already checked in on {0}")]
    AlreadyCheckedIn(chrono::NaiveDate),
    #[error("User not found: {0}")]
    RecordNotFound(String),
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
