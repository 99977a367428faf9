//! Entity Module

pub mod settings;
pub mod user_account;
pub mod withdrawal;
