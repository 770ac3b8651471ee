use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Every new account starts with the same balance.
pub const STARTING_BALANCE: i64 = 30000;
pub const REFERRAL_PREFIX: &str = "REF-";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_check_in: Option<NaiveDate>,
    #[serde(default)]
    pub checked_dates: Vec<NaiveDate>,
    pub referral_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_pay_id: Option<bool>,
}

impl User {
    pub fn new(
        id: String,
        name: String,
        email: String,
        password: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let referral_code = referral_code_for(&id);

        Self {
            id,
            name,
            email,
            password,
            balance: STARTING_BALANCE,
            created_at,
            last_check_in: None,
            checked_dates: Vec::new(),
            referral_code,
            has_pay_id: None,
        }
    }

    pub fn email_matches(&self, email: &str) -> bool {
        !email.is_empty() && self.email.to_lowercase() == email.to_lowercase()
    }

    pub fn has_checked_in_on(&self, date: NaiveDate) -> bool {
        self.last_check_in == Some(date) || self.checked_dates.contains(&date)
    }

    /// Returns false when `date` was already recorded.
    pub fn record_check_in(&mut self, date: NaiveDate) -> bool {
        if self.has_checked_in_on(date) {
            return false;
        }

        self.checked_dates.push(date);
        self.last_check_in = Some(date);
        true
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn has_pay_id(&self) -> bool {
        self.has_pay_id.unwrap_or(false)
    }
}

/// "REF-" followed by the last six characters of the id, uppercased.
pub fn referral_code_for(id: &str) -> String {
    let skip = id.chars().count().saturating_sub(6);
    let suffix: String = id.chars().skip(skip).collect();

    format!("{}{}", REFERRAL_PREFIX, suffix.to_uppercase())
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
