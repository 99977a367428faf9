//! Ledger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Accounts, settings, withdrawals, the reward engine, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Ledger Model
//! - Balances are integer milli-units; responses divide by 1000
//! - Every balance/counter mutation is a locked read-modify-write on one account
//! - Withdrawal creation and the balance reset commit together or not at all
//! - Per-day counters reset lazily on the first action of a UTC day

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{LedgerError, LedgerResult};
pub use infra::memory::MemoryLedger;
pub use infra::postgres::PgLedgerRepository;
pub use presentation::router::{admin_router, user_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
