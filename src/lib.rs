//! Mock account dashboard: signup, login, a fixed starting balance and a
//! once-a-day check-in, all kept in a local key-value store.
//!
//! Nothing here is secure. Passwords are stored as typed and no money ever
//! moves; the withdraw, referral and Pay-ID actions only answer with a
//! message.

pub mod clock;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;
pub mod storage;
