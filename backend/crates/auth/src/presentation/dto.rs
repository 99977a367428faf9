//! API DTOs (Data Transfer Objects)

use ledger::presentation::dto::AccountView;
use serde::{Deserialize, Deserializer, Serialize};

/// POST /api/auth request, as sent by the Telegram web app
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[serde(deserialize_with = "identity")]
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Referrer's Telegram id; empty or null means none
    #[serde(default, deserialize_with = "optional_identity")]
    pub referred_by: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountView,
}

/// Telegram ids arrive as numbers or as numeric strings (start params).
#[derive(Deserialize)]
#[serde(untagged)]
enum IdentityRepr {
    Number(i64),
    Text(String),
}

fn identity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IdentityRepr::deserialize(deserializer)? {
        IdentityRepr::Number(id) => Ok(id),
        IdentityRepr::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom("telegramId must be numeric")),
    }
}

fn optional_identity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdentityRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdentityRepr::Number(id)) => Ok(Some(id)),
        Some(IdentityRepr::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(IdentityRepr::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("referredBy must be numeric")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_ids() {
        let req: AuthRequest = serde_json::from_value(json!({
            "telegramId": 123,
            "referredBy": "456"
        }))
        .unwrap();
        assert_eq!(req.telegram_id, 123);
        assert_eq!(req.referred_by, Some(456));

        let req: AuthRequest = serde_json::from_value(json!({
            "telegramId": "789",
            "username": "bob",
            "referredBy": ""
        }))
        .unwrap();
        assert_eq!(req.telegram_id, 789);
        assert_eq!(req.username.as_deref(), Some("bob"));
        assert_eq!(req.referred_by, None);
    }

    #[test]
    fn test_missing_referrer() {
        let req: AuthRequest =
            serde_json::from_value(json!({ "telegramId": 1, "referredBy": null })).unwrap();
        assert_eq!(req.referred_by, None);
        let req: AuthRequest = serde_json::from_value(json!({ "telegramId": 1 })).unwrap();
        assert_eq!(req.referred_by, None);
    }

    #[test]
    fn test_rejects_non_numeric_identity() {
        assert!(serde_json::from_value::<AuthRequest>(json!({ "telegramId": "abc" })).is_err());
        assert!(serde_json::from_value::<AuthRequest>(json!({})).is_err());
    }
}
