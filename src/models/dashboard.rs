use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::users::User;

pub const CHECKED_IN_TODAY: &str = "You have checked-in today.";
pub const CHECK_IN_AVAILABLE: &str = "You can check-in once every 24 hours.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub name: String,
    pub balance: i64,
    pub balance_display: String,
    pub referral_code: String,
    pub account_number: String,
    pub has_pay_id: bool,
    pub checked_in_today: bool,
    pub check_in_status: String,
}

impl Dashboard {
    pub fn for_user(user: &User, today: NaiveDate) -> Self {
        let checked_in_today = user.last_check_in == Some(today);
        let status = if checked_in_today {
            CHECKED_IN_TODAY
        } else {
            CHECK_IN_AVAILABLE
        };

        Self {
            name: user.display_name().to_string(),
            balance: user.balance,
            balance_display: format_naira(user.balance),
            referral_code: user.referral_code.clone(),
            account_number: user.id.clone(),
            has_pay_id: user.has_pay_id(),
            checked_in_today,
            check_in_status: status.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub checked: bool,
    pub today: bool,
}

/// Check-in history laid out over the month containing `today`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckInCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st, with Sunday as the first column.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CheckInCalendar {
    pub fn for_month(user: &User, today: NaiveDate) -> Self {
        let year = today.year();
        let month = today.month();
        let first = today.with_day(1).unwrap_or(today);

        let days = first
            .iter_days()
            .take_while(|date| date.month() == month)
            .map(|date| CalendarDay {
                day: date.day(),
                date,
                checked: user.checked_dates.contains(&date),
                today: date == today,
            })
            .collect();

        Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        }
    }
}

/// Naira amount with comma thousands separators, e.g. `₦30,000`.
pub fn format_naira(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0 {
        format!("₦-{}", grouped)
    } else {
        format!("₦{}", grouped)
    }
}
