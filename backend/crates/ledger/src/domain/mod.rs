//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Entities (UserAccount, Withdrawal, Settings)
//! - Value objects (Milli, DayKey, Tier, UserRole, WithdrawalStatus)
//! - The reward engine (pure eligibility and amount computation)
//! - Repository traits (interfaces)

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{settings::Settings, user_account::UserAccount, withdrawal::Withdrawal};
pub use repository::{AccountRepository, LedgerStore, SettingsRepository, WithdrawalRepository};
