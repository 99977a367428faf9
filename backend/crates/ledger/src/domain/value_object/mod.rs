//! Value Object Module

pub mod day_key;
pub mod milli;
pub mod tier;
pub mod user_role;
pub mod withdrawal_status;
