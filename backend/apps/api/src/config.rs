//! Server configuration from environment variables

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use std::env;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<HeaderValue>,
    /// None means "generate one" (debug builds only)
    pub token_secret: Option<[u8; 32]>,
    pub admin_telegram_ids: Vec<i64>,
    pub daily_reset_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let port = match env::var("PORT") {
            Ok(value) => value.trim().parse().context("PORT must be a valid port")?,
            Err(_) => DEFAULT_PORT,
        };

        let frontend_origins = parse_origins(
            &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        let token_secret = match env::var("AUTH_TOKEN_SECRET") {
            Ok(value) => Some(decode_secret(&value)?),
            Err(_) if cfg!(debug_assertions) => None,
            Err(_) => bail!("AUTH_TOKEN_SECRET must be set in production"),
        };

        let admin_telegram_ids =
            parse_admin_ids(&env::var("ADMIN_TELEGRAM_IDS").unwrap_or_default())?;

        let daily_reset_enabled = env::var("DAILY_RESET_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            max_connections,
            port,
            frontend_origins,
            token_secret,
            admin_telegram_ids,
            daily_reset_enabled,
        })
    }
}

/// Base64 (standard alphabet) of exactly 32 bytes
fn decode_secret(value: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64(value.trim())
        .context("AUTH_TOKEN_SECRET must be base64")?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        anyhow::anyhow!(
            "AUTH_TOKEN_SECRET must decode to 32 bytes, got {}",
            bytes.len()
        )
    })
}

fn parse_admin_ids(value: &str) -> anyhow::Result<Vec<i64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse()
                .with_context(|| format!("Invalid ADMIN_TELEGRAM_IDS entry: {}", id))
        })
        .collect()
}

fn parse_origins(value: &str) -> Vec<HeaderValue> {
    value
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect()
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret() {
        // 32 zero bytes
        let encoded = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";
        assert_eq!(decode_secret(encoded).unwrap(), [0u8; 32]);

        // 16 zero bytes
        assert!(decode_secret("AAAAAAAAAAAAAAAAAAAAAA==").is_err());
        assert!(decode_secret("not base64!").is_err());
    }

    #[test]
    fn test_parse_admin_ids() {
        assert_eq!(
            parse_admin_ids("8457318925, 42,").unwrap(),
            vec![8457318925, 42]
        );
        assert!(parse_admin_ids("").unwrap().is_empty());
        assert!(parse_admin_ids("12,abc").is_err());
    }

    #[test]
    fn test_parse_origins_skips_invalid() {
        let origins = parse_origins("https://app.example.com, \n,http://localhost:3000");
        assert_eq!(origins.len(), 2);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" off "));
    }
}
