//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary every crate in the workspace agrees on:
//! - Common error types and result aliases
//! - Typed entity identifiers
//! - The authenticated caller (`Principal`) and its capabilities

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod principal;
