//! Application Layer
//!
//! Use cases, token handling and configuration.

pub mod authenticate;
pub mod config;
pub mod sign_in;
pub mod token;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use token::{IssuedToken, TokenError};
