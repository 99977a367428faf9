use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    User = 0,
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Unknown ids fall back to the least privileged role.
    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            1 => UserRole::Admin,
            0 => UserRole::User,
            _ => {
                tracing::error!("Invalid UserRole id: {}", id);
                UserRole::User
            }
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        assert_eq!(UserRole::from_id(UserRole::User.id()), UserRole::User);
        assert_eq!(UserRole::from_id(UserRole::Admin.id()), UserRole::Admin);
        assert_eq!(UserRole::from_id(42), UserRole::User);
    }

    #[test]
    fn test_is_admin() {
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::User.is_admin());
        assert_eq!(UserRole::default(), UserRole::User);
    }
}
