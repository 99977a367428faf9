//! Auth (Identity Gate) Backend Module
//!
//! Clean Architecture structure:
//! - `application/` - Sign-in and authenticate use cases, bearer tokens, config
//! - `presentation/` - Handler, DTOs, router, middleware
//!
//! Accounts themselves live in the `ledger` crate; this crate only decides
//! who the caller is.
//!
//! ## Security Model
//! - Identity is the Telegram id sent by the client at sign-in
//! - Stateless bearer tokens signed with HMAC-SHA256, valid for 30 days
//! - The role is re-read from the account on every request
//! - Admin role granted at sign-in to configured identities only

pub mod application;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use presentation::router::{auth_router, auth_state, protect};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
