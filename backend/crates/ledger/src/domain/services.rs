//! Reward Engine
//!
//! Pure eligibility checks and amount computation. Every function takes the
//! account, the settings read for this request and the current UTC day, and
//! either mutates the account in place or returns a [`Rejection`] leaving it
//! untouched (apart from the lazy day roll-over, which always applies).

use crate::domain::entity::{settings::Settings, user_account::UserAccount, withdrawal::Withdrawal};
use crate::domain::value_object::{
    day_key::DayKey,
    milli::{Milli, scale_non_negative},
};

/// Business-rule rejection, surfaced to the client as a 400 with this message
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("User is banned")]
    Banned,
    #[error("Daily limit reached")]
    DailyLimitReached,
    #[error("Daily bonus is disabled")]
    DailyBonusDisabled,
    #[error("Daily bonus already claimed today")]
    DailyBonusAlreadyClaimed,
    #[error("Insufficient balance for withdrawal")]
    InsufficientBalance,
    #[error("Withdrawal method not available")]
    MethodUnavailable,
    #[error("User already has premium")]
    AlreadyPremium,
    #[error("Withdrawal address is required")]
    EmptyAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdCredit {
    pub reward: Milli,
    pub balance: Milli,
    pub daily_ads: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusCredit {
    pub bonus: Milli,
    pub balance: Milli,
}

/// `round(base × eventMultiplier)`, never negative
pub fn scaled_reward(base: i64, settings: &Settings) -> Milli {
    scale_non_negative(base as f64, settings.event_multiplier)
}

pub fn watch_ad(
    account: &mut UserAccount,
    settings: &Settings,
    today: DayKey,
) -> Result<AdCredit, Rejection> {
    account.roll_over(today);

    if account.banned {
        return Err(Rejection::Banned);
    }

    let tier = account.tier();
    if account.daily_ads >= settings.daily_ad_limit(tier) {
        return Err(Rejection::DailyLimitReached);
    }

    let reward = scaled_reward(settings.ad_reward_base(tier), settings);
    account.daily_ads += 1;
    account.total_ads += 1;
    account.credit(reward);

    Ok(AdCredit {
        reward,
        balance: account.balance,
        daily_ads: account.daily_ads,
    })
}

pub fn claim_daily_bonus(
    account: &mut UserAccount,
    settings: &Settings,
    today: DayKey,
) -> Result<BonusCredit, Rejection> {
    if !settings.daily_bonus.enabled {
        return Err(Rejection::DailyBonusDisabled);
    }
    if account.banned {
        return Err(Rejection::Banned);
    }
    if account.daily_bonus_date == Some(today) {
        return Err(Rejection::DailyBonusAlreadyClaimed);
    }

    let bonus = scaled_reward(settings.daily_bonus.amount, settings);
    account.credit(bonus);
    account.daily_bonus_date = Some(today);

    Ok(BonusCredit {
        bonus,
        balance: account.balance,
    })
}

/// Flag flip only; no balance is charged.
pub fn activate_premium(account: &mut UserAccount) -> Result<(), Rejection> {
    if account.premium {
        return Err(Rejection::AlreadyPremium);
    }
    account.premium = true;
    Ok(())
}

/// Snapshot the whole balance into a pending withdrawal and zero the balance.
pub fn request_withdrawal(
    account: &mut UserAccount,
    settings: &Settings,
    method: &str,
    address: &str,
) -> Result<Withdrawal, Rejection> {
    if account.banned {
        return Err(Rejection::Banned);
    }
    if account.balance < settings.withdrawal_threshold(account.tier()) {
        return Err(Rejection::InsufficientBalance);
    }
    if !settings.method_enabled(method) {
        return Err(Rejection::MethodUnavailable);
    }
    let address = address.trim();
    if address.is_empty() {
        return Err(Rejection::EmptyAddress);
    }

    let amount = account.balance;
    account.balance = Milli::ZERO;

    Ok(Withdrawal::new(
        account.user_id,
        amount,
        method.to_string(),
        address.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user_account::NewAccount;
    use crate::domain::value_object::tier::TierPair;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn account() -> UserAccount {
        UserAccount::new(NewAccount {
            telegram_id: 1001,
            ..Default::default()
        })
    }

    #[test]
    fn test_reward_uses_multiplier() {
        let mut settings = Settings::default();
        settings.event_multiplier = 1.5;
        let mut account = account();

        let credit = watch_ad(&mut account, &settings, day("2026-04-01")).unwrap();
        assert_eq!(credit.reward, Milli::new(3));
        assert_eq!(credit.reward.to_display(), 0.003);
        assert_eq!(account.total_ads, 1);
        assert_eq!(account.total_earned, Milli::new(3));
    }

    #[test]
    fn test_premium_rate() {
        let settings = Settings::default();
        let mut account = account();
        account.premium = true;

        let credit = watch_ad(&mut account, &settings, day("2026-04-01")).unwrap();
        assert_eq!(credit.reward, Milli::new(4));
    }

    #[test]
    fn test_daily_limit_boundary() {
        let settings = Settings::default();
        let today = day("2026-04-01");
        let mut account = account();
        account.last_ad_date = Some(today);
        account.daily_ads = 999;

        let credit = watch_ad(&mut account, &settings, today).unwrap();
        assert_eq!(credit.daily_ads, 1000);

        let balance = account.balance;
        assert_eq!(
            watch_ad(&mut account, &settings, today),
            Err(Rejection::DailyLimitReached)
        );
        assert_eq!(account.balance, balance);
        assert_eq!(account.daily_ads, 1000);
    }

    #[test]
    fn test_rollover_happens_before_limit_check() {
        let mut settings = Settings::default();
        settings.daily_limit = TierPair::new(1, 1);
        let mut account = account();
        account.last_ad_date = Some(day("2026-04-01"));
        account.daily_ads = 1;

        let credit = watch_ad(&mut account, &settings, day("2026-04-02")).unwrap();
        assert_eq!(credit.daily_ads, 1);
        assert_eq!(account.last_ad_date, Some(day("2026-04-02")));
    }

    #[test]
    fn test_daily_bonus_once_per_day() {
        let settings = Settings::default();
        let mut account = account();

        let credit = claim_daily_bonus(&mut account, &settings, day("2026-04-01")).unwrap();
        assert_eq!(credit.bonus, Milli::new(10));
        assert_eq!(
            claim_daily_bonus(&mut account, &settings, day("2026-04-01")),
            Err(Rejection::DailyBonusAlreadyClaimed)
        );
        assert!(claim_daily_bonus(&mut account, &settings, day("2026-04-02")).is_ok());
        assert_eq!(account.balance, Milli::new(20));
    }

    #[test]
    fn test_daily_bonus_disabled_checked_first() {
        let mut settings = Settings::default();
        settings.daily_bonus.enabled = false;
        let mut account = account();
        account.banned = true;

        assert_eq!(
            claim_daily_bonus(&mut account, &settings, day("2026-04-01")),
            Err(Rejection::DailyBonusDisabled)
        );
    }

    #[test]
    fn test_banned_rejections() {
        let settings = Settings::default();
        let mut account = account();
        account.banned = true;
        account.balance = Milli::new(5000);

        assert_eq!(
            watch_ad(&mut account, &settings, day("2026-04-01")),
            Err(Rejection::Banned)
        );
        assert_eq!(
            claim_daily_bonus(&mut account, &settings, day("2026-04-01")),
            Err(Rejection::Banned)
        );
        assert_eq!(
            request_withdrawal(&mut account, &settings, "usdt", "TAddr").unwrap_err(),
            Rejection::Banned
        );
        assert_eq!(account.balance, Milli::new(5000));
    }

    #[test]
    fn test_withdrawal_threshold_boundary() {
        let settings = Settings::default();
        let mut account = account();
        account.balance = Milli::new(1999);
        assert_eq!(
            request_withdrawal(&mut account, &settings, "usdt", "TAddr").unwrap_err(),
            Rejection::InsufficientBalance
        );

        account.balance = Milli::new(2000);
        let withdrawal = request_withdrawal(&mut account, &settings, "usdt", " TAddr ").unwrap();
        assert_eq!(withdrawal.amount, Milli::new(2000));
        assert_eq!(withdrawal.address, "TAddr");
        assert_eq!(account.balance, Milli::ZERO);
    }

    #[test]
    fn test_withdrawal_method_and_address() {
        let mut settings = Settings::default();
        settings.methods.insert("nagad".into(), false);
        let mut account = account();
        account.balance = Milli::new(3000);

        assert_eq!(
            request_withdrawal(&mut account, &settings, "nagad", "017").unwrap_err(),
            Rejection::MethodUnavailable
        );
        assert_eq!(
            request_withdrawal(&mut account, &settings, "paypal", "me").unwrap_err(),
            Rejection::MethodUnavailable
        );
        assert_eq!(
            request_withdrawal(&mut account, &settings, "usdt", "   ").unwrap_err(),
            Rejection::EmptyAddress
        );
        assert_eq!(account.balance, Milli::new(3000));
    }

    #[test]
    fn test_premium_once() {
        let mut account = account();
        assert!(activate_premium(&mut account).is_ok());
        assert_eq!(activate_premium(&mut account), Err(Rejection::AlreadyPremium));
    }
}
