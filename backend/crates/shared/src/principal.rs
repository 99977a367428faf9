//! Authenticated caller
//!
//! The identity gate resolves a bearer token into a [`Principal`] and puts it
//! into the request extensions; downstream handlers only ever see this type.

use crate::error::app_error::{AppError, AppResult};
use crate::id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    /// External identity key the account was created for
    pub telegram_id: i64,
    pub is_admin: bool,
}

impl Principal {
    pub fn new(user_id: UserId, telegram_id: i64, is_admin: bool) -> Self {
        Self {
            user_id,
            telegram_id,
            is_admin,
        }
    }

    /// Capability check for the admin surface.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::forbidden("Access denied"))
        }
    }
}
