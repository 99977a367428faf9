//! Application Configuration
//!
//! Configuration for the identity gate.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Bearer tokens stay valid for 30 days
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for bearer tokens (32 bytes)
    pub token_secret: [u8; 32],
    pub token_ttl: Duration,
    /// Telegram identities granted the admin role at sign-in
    pub admin_telegram_ids: HashSet<i64>,
}

impl AuthConfig {
    pub fn new(token_secret: [u8; 32]) -> Self {
        Self {
            token_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            admin_telegram_ids: HashSet::new(),
        }
    }

    /// Config with a random token secret (tokens die with the process)
    pub fn with_random_secret() -> Self {
        Self::new(platform::crypto::random_secret())
    }

    pub fn with_admins(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.admin_telegram_ids.extend(ids);
        self
    }

    #[inline]
    pub fn is_admin_identity(&self, telegram_id: i64) -> bool {
        self.admin_telegram_ids.contains(&telegram_id)
    }

    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl.as_millis() as i64
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("admin_telegram_ids", &self.admin_telegram_ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_identities() {
        let config = AuthConfig::with_random_secret().with_admins([8457318925]);
        assert!(config.is_admin_identity(8457318925));
        assert!(!config.is_admin_identity(1));
        assert_eq!(config.token_ttl_ms(), 30 * 24 * 3600 * 1000);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = AuthConfig::new([7u8; 32]);
        let debug = format!("{:?}", config);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("7, 7"));
    }
}
