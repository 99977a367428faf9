//! Global Settings Entity
//!
//! Single configuration record read by every reward-granting action and
//! written only by the admin surface. Absent records read as [`Settings::default`].
//! Amounts are stored units (milli), except the `*USDT` fields which are
//! display units.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::value_object::milli::Milli;
use crate::domain::value_object::tier::{Tier, TierPair};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Minimum balance required to withdraw
    pub thresholds: TierPair<i64>,
    /// Base credit per ad view
    pub ad_reward: TierPair<i64>,
    /// Maximum credited ad views per UTC day
    pub daily_limit: TierPair<i64>,
    /// Applied to every reward amount at computation time
    pub event_multiplier: f64,
    pub daily_bonus: DailyBonus,
    #[serde(rename = "referralBonusUSDT")]
    pub referral_bonus_usdt: f64,
    #[serde(rename = "premiumCostUSDT")]
    pub premium_cost_usdt: f64,
    /// Payout method name -> enabled
    pub methods: BTreeMap<String, bool>,
    pub per_placement: PerPlacement,
    pub ad_auto_credit: bool,
    pub ad_count_as_show: bool,
    pub theme: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBonus {
    pub enabled: bool,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerPlacement {
    pub rewarded_interstitial: i64,
    pub rewarded_popup: i64,
    pub app_open: i64,
}

impl Default for Settings {
    fn default() -> Self {
        let methods = ["usdt", "bkash", "nagad"]
            .into_iter()
            .map(|name| (name.to_string(), true))
            .collect();

        Self {
            thresholds: TierPair::new(2000, 1000),
            ad_reward: TierPair::new(2, 4),
            daily_limit: TierPair::new(1000, 99_999_999),
            event_multiplier: 1.0,
            daily_bonus: DailyBonus {
                enabled: true,
                amount: 10,
            },
            referral_bonus_usdt: 0.5,
            premium_cost_usdt: 20.0,
            methods,
            per_placement: PerPlacement {
                rewarded_interstitial: 2,
                rewarded_popup: 2,
                app_open: 0,
            },
            ad_auto_credit: true,
            ad_count_as_show: true,
            theme: "auto".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings update must be a JSON object")]
    NotAnObject,
    #[error("Invalid settings document: {0}")]
    Malformed(String),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

impl Settings {
    pub fn withdrawal_threshold(&self, tier: Tier) -> Milli {
        Milli::new(self.thresholds.for_tier(tier))
    }

    pub fn ad_reward_base(&self, tier: Tier) -> i64 {
        self.ad_reward.for_tier(tier)
    }

    pub fn daily_ad_limit(&self, tier: Tier) -> i64 {
        self.daily_limit.for_tier(tier)
    }

    /// Unknown methods are disabled.
    pub fn method_enabled(&self, method: &str) -> bool {
        self.methods.get(method).copied().unwrap_or(false)
    }

    pub fn referral_bonus(&self) -> Milli {
        Milli::from_display(self.referral_bonus_usdt)
    }

    /// Apply an admin patch: objects merge key by key (recursively), any
    /// other value replaces. Unknown keys are dropped. The result is validated.
    pub fn apply_patch(&self, patch: &Value) -> Result<Settings, SettingsError> {
        if !patch.is_object() {
            return Err(SettingsError::NotAnObject);
        }

        let mut document =
            serde_json::to_value(self).map_err(|e| SettingsError::Malformed(e.to_string()))?;
        merge_json(&mut document, patch);

        let updated: Settings =
            serde_json::from_value(document).map_err(|e| SettingsError::Malformed(e.to_string()))?;
        updated.validate()?;
        Ok(updated)
    }

    /// Amounts and limits are non-negative and the multiplier is a finite,
    /// non-negative number, so every computed reward is non-negative.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let integers = [
            ("thresholds.normal", self.thresholds.normal),
            ("thresholds.premium", self.thresholds.premium),
            ("adReward.normal", self.ad_reward.normal),
            ("adReward.premium", self.ad_reward.premium),
            ("dailyLimit.normal", self.daily_limit.normal),
            ("dailyLimit.premium", self.daily_limit.premium),
            ("dailyBonus.amount", self.daily_bonus.amount),
            ("perPlacement.rewardedInterstitial", self.per_placement.rewarded_interstitial),
            ("perPlacement.rewardedPopup", self.per_placement.rewarded_popup),
            ("perPlacement.appOpen", self.per_placement.app_open),
        ];
        for (name, value) in integers {
            if value < 0 {
                return Err(SettingsError::Negative(name));
            }
        }

        let floats = [
            ("eventMultiplier", self.event_multiplier),
            ("referralBonusUSDT", self.referral_bonus_usdt),
            ("premiumCostUSDT", self.premium_cost_usdt),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite(name));
            }
            if value < 0.0 {
                return Err(SettingsError::Negative(name));
            }
        }

        Ok(())
    }
}

fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.withdrawal_threshold(Tier::Normal), Milli::new(2000));
        assert_eq!(settings.withdrawal_threshold(Tier::Premium), Milli::new(1000));
        assert_eq!(settings.ad_reward_base(Tier::Premium), 4);
        assert_eq!(settings.daily_ad_limit(Tier::Premium), 99_999_999);
        assert_eq!(settings.referral_bonus(), Milli::new(500));
        assert!(settings.method_enabled("bkash"));
        assert!(!settings.method_enabled("paypal"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["adReward"]["normal"], 2);
        assert_eq!(json["dailyBonus"]["amount"], 10);
        assert_eq!(json["referralBonusUSDT"], 0.5);
        assert_eq!(json["perPlacement"]["rewardedInterstitial"], 2);
        assert_eq!(json["theme"], "auto");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_value(json!({ "eventMultiplier": 2.0 })).unwrap();
        assert_eq!(settings.event_multiplier, 2.0);
        assert_eq!(settings.thresholds, Settings::default().thresholds);
    }

    #[test]
    fn test_patch_merges_nested_objects() {
        let updated = Settings::default()
            .apply_patch(&json!({
                "adReward": { "normal": 5 },
                "methods": { "usdt": false, "paypal": true },
                "eventMultiplier": 1.5,
                "unknownKey": "ignored"
            }))
            .unwrap();

        assert_eq!(updated.ad_reward, TierPair::new(5, 4));
        assert!(!updated.method_enabled("usdt"));
        assert!(updated.method_enabled("paypal"));
        assert!(updated.method_enabled("nagad"));
        assert_eq!(updated.event_multiplier, 1.5);
    }

    #[test]
    fn test_patch_rejects_bad_input() {
        let settings = Settings::default();
        assert_eq!(
            settings.apply_patch(&json!([1, 2])),
            Err(SettingsError::NotAnObject)
        );
        assert!(matches!(
            settings.apply_patch(&json!({ "adReward": { "normal": "lots" } })),
            Err(SettingsError::Malformed(_))
        ));
        assert_eq!(
            settings.apply_patch(&json!({ "eventMultiplier": -1.0 })),
            Err(SettingsError::Negative("eventMultiplier"))
        );
        assert_eq!(
            settings.apply_patch(&json!({ "dailyLimit": { "premium": -5 } })),
            Err(SettingsError::Negative("dailyLimit.premium"))
        );
    }
}
