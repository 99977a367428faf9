//! User Account Entity
//!
//! One account per Telegram identity. Holds the balance and the counters the
//! reward engine reads and writes.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    day_key::DayKey, milli::Milli, tier::Tier, user_role::UserRole,
};

/// Sign-in payload used to create an account
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub referred_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    /// Internal UUID identifier (token subject)
    pub user_id: UserId,
    /// External identity key, unique and immutable
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_role: UserRole,
    /// Never negative
    pub balance: Milli,
    pub total_earned: Milli,
    pub total_ads: i64,
    pub daily_ads: i64,
    pub last_ad_date: Option<DayKey>,
    pub daily_bonus_date: Option<DayKey>,
    pub premium: bool,
    pub banned: bool,
    pub referrals: i64,
    pub referred_by: Option<i64>,
    pub badges: Vec<String>,
    pub join_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(new_account: NewAccount) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            telegram_id: new_account.telegram_id,
            username: new_account.username,
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            user_role: UserRole::default(),
            balance: Milli::ZERO,
            total_earned: Milli::ZERO,
            total_ads: 0,
            daily_ads: 0,
            last_ad_date: None,
            daily_bonus_date: None,
            premium: false,
            banned: false,
            referrals: 0,
            referred_by: new_account.referred_by,
            badges: Vec::new(),
            join_date: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn tier(&self) -> Tier {
        Tier::from_premium(self.premium)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    /// Lazy per-day reset. Returns true if the counter was rolled over.
    pub fn roll_over(&mut self, today: DayKey) -> bool {
        if self.last_ad_date == Some(today) {
            return false;
        }
        self.daily_ads = 0;
        self.last_ad_date = Some(today);
        true
    }

    /// Ads watched on `today`, without touching `last_ad_date`.
    pub fn daily_ads_on(&self, today: DayKey) -> i64 {
        if self.last_ad_date == Some(today) {
            self.daily_ads
        } else {
            0
        }
    }

    /// Credit an earned amount to both balance and lifetime earnings.
    pub fn credit(&mut self, amount: Milli) {
        self.balance = self.balance.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
    }

    /// Referrer credit: counts the referral and raises the balance only.
    pub fn credit_referral(&mut self, bonus: Milli) {
        self.referrals += 1;
        self.balance = self.balance.saturating_add(bonus);
    }

    /// A referral counts only if it names someone other than the new account.
    pub fn referrer(&self) -> Option<i64> {
        self.referred_by
            .filter(|&referrer| referrer != 0 && referrer != self.telegram_id)
    }

    /// Returns true if the role changed.
    pub fn set_admin(&mut self, admin: bool) -> bool {
        let role = if admin { UserRole::Admin } else { UserRole::User };
        let changed = self.user_role != role;
        self.user_role = role;
        changed
    }

    pub fn toggle_premium(&mut self) -> bool {
        self.premium = !self.premium;
        self.premium
    }

    pub fn toggle_banned(&mut self) -> bool {
        self.banned = !self.banned;
        self.banned
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        UserAccount::new(NewAccount {
            telegram_id: 42,
            referred_by: Some(7),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_account_defaults() {
        let account = account();
        assert_eq!(account.balance, Milli::ZERO);
        assert_eq!(account.tier(), Tier::Normal);
        assert!(!account.is_admin());
        assert_eq!(account.referrer(), Some(7));
    }

    #[test]
    fn test_self_referral_is_ignored() {
        let mut account = account();
        account.referred_by = Some(42);
        assert_eq!(account.referrer(), None);
        account.referred_by = Some(0);
        assert_eq!(account.referrer(), None);
    }

    #[test]
    fn test_roll_over() {
        let mut account = account();
        let today: DayKey = "2026-03-01".parse().unwrap();
        account.daily_ads = 12;

        assert!(account.roll_over(today));
        assert_eq!(account.daily_ads, 0);

        account.daily_ads = 3;
        assert!(!account.roll_over(today));
        assert_eq!(account.daily_ads, 3);
    }

    #[test]
    fn test_daily_ads_on_keeps_last_ad_date() {
        let mut account = account();
        let yesterday: DayKey = "2026-02-28".parse().unwrap();
        let today: DayKey = "2026-03-01".parse().unwrap();
        account.daily_ads = 9;
        account.last_ad_date = Some(yesterday);

        assert_eq!(account.daily_ads_on(yesterday), 9);
        assert_eq!(account.daily_ads_on(today), 0);
        assert_eq!(account.last_ad_date, Some(yesterday));
    }

    #[test]
    fn test_set_admin_both_ways() {
        let mut account = account();
        assert!(account.set_admin(true));
        assert!(account.is_admin());
        assert!(!account.set_admin(true));
        assert!(account.set_admin(false));
        assert!(!account.is_admin());
    }

    #[test]
    fn test_referral_credit_leaves_total_earned() {
        let mut account = account();
        account.credit_referral(Milli::new(500));
        assert_eq!(account.referrals, 1);
        assert_eq!(account.balance, Milli::new(500));
        assert_eq!(account.total_earned, Milli::ZERO);
    }
}
