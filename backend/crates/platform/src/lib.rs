//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business meaning:
//! - Cryptographic utilities (HMAC-SHA256, Base64, random secrets)
//! - Bearer token extraction from request headers
//! - UTC calendar helpers used for day boundaries

pub mod bearer;
pub mod clock;
pub mod crypto;
