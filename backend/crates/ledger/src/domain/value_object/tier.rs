//! Account tier
//!
//! Normal vs premium; gates reward rate, daily limit and withdrawal threshold.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Normal,
    Premium,
}

impl Tier {
    #[inline]
    pub const fn from_premium(premium: bool) -> Self {
        if premium { Tier::Premium } else { Tier::Normal }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Tier::Normal => "normal",
            Tier::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One setting value per tier, serialized as `{ "normal": .., "premium": .. }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPair<T> {
    pub normal: T,
    pub premium: T,
}

impl<T: Copy> TierPair<T> {
    pub const fn new(normal: T, premium: T) -> Self {
        Self { normal, premium }
    }

    #[inline]
    pub fn for_tier(&self, tier: Tier) -> T {
        match tier {
            Tier::Normal => self.normal,
            Tier::Premium => self.premium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tier() {
        let pair = TierPair::new(2000, 1000);
        assert_eq!(pair.for_tier(Tier::Normal), 2000);
        assert_eq!(pair.for_tier(Tier::Premium), 1000);
        assert_eq!(pair.for_tier(Tier::from_premium(true)), 1000);
    }
}
