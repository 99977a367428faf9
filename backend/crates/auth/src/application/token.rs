//! Bearer Token
//!
//! Format: `<user-uuid>.<expires-at-ms>.<sig>` where `sig` is URL-safe,
//! unpadded base64 of HMAC-SHA256(secret, `<user-uuid>.<expires-at-ms>`).
//! Stateless: the server stores nothing per token.

use kernel::id::UserId;
use platform::crypto::{from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256};

use crate::application::config::AuthConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at_ms: i64,
}

/// Why a token was refused. Never shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

pub fn issue(config: &AuthConfig, user_id: &UserId, now_ms: i64) -> IssuedToken {
    let expires_at_ms = now_ms.saturating_add(config.token_ttl_ms());
    let payload = format!("{}.{}", user_id, expires_at_ms);
    let sig = hmac_sha256(&config.token_secret, payload.as_bytes());

    IssuedToken {
        token: format!("{}.{}", payload, to_base64_url(&sig)),
        expires_at_ms,
    }
}

/// Verify signature and expiry; returns the bound user id.
pub fn verify(config: &AuthConfig, token: &str, now_ms: i64) -> Result<UserId, TokenError> {
    let (payload, sig) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
    let (user_id, expires_at_ms) = payload.split_once('.').ok_or(TokenError::Malformed)?;

    let sig = from_base64_url(sig).map_err(|_| TokenError::Malformed)?;
    if !verify_hmac_sha256(&config.token_secret, payload.as_bytes(), &sig) {
        return Err(TokenError::BadSignature);
    }

    let expires_at_ms: i64 = expires_at_ms.parse().map_err(|_| TokenError::Malformed)?;
    if now_ms >= expires_at_ms {
        return Err(TokenError::Expired);
    }

    user_id.parse().map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_767_225_600_000;

    fn config() -> AuthConfig {
        AuthConfig::new([42u8; 32])
    }

    #[test]
    fn test_issue_then_verify() {
        let user_id = UserId::new();
        let issued = issue(&config(), &user_id, NOW);
        assert_eq!(issued.expires_at_ms, NOW + config().token_ttl_ms());
        assert!(issued.token.starts_with(&user_id.to_string()));
        assert_eq!(verify(&config(), &issued.token, NOW + 1), Ok(user_id));
    }

    #[test]
    fn test_expired() {
        let issued = issue(&config(), &UserId::new(), NOW);
        assert_eq!(
            verify(&config(), &issued.token, issued.expires_at_ms),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let issued = issue(&config(), &UserId::new(), NOW);
        let other = AuthConfig::new([1u8; 32]);
        assert_eq!(
            verify(&other, &issued.token, NOW),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_expiry() {
        let issued = issue(&config(), &UserId::new(), NOW);
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let extended = (issued.expires_at_ms * 2).to_string();
        parts[1] = &extended;
        assert_eq!(
            verify(&config(), &parts.join("."), NOW),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_malformed() {
        for token in ["", "abc", "a.b", "a.b.!!!", "not-a-uuid.123.AAAA"] {
            assert!(verify(&config(), token, NOW).is_err(), "{token}");
        }
    }
}
