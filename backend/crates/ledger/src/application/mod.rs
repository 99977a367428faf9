//! Application Layer
//!
//! Use cases. Each one reads settings once, then runs a single locked
//! mutation through the repository.

pub mod admin_settings;
pub mod buy_premium;
pub mod daily_bonus;
pub mod daily_reset;
pub mod list_withdrawals;
pub mod manage_users;
pub mod profile;
pub mod register_account;
pub mod request_withdrawal;
pub mod review_withdrawals;
pub mod watch_ad;

// Re-exports
pub use admin_settings::{GetSettingsUseCase, UpdateSettingsUseCase};
pub use buy_premium::BuyPremiumUseCase;
pub use daily_bonus::DailyBonusUseCase;
pub use daily_reset::DailyResetUseCase;
pub use list_withdrawals::ListWithdrawalsUseCase;
pub use manage_users::ManageUsersUseCase;
pub use profile::{ProfileOutput, ProfileUseCase};
pub use register_account::RegisterAccountUseCase;
pub use request_withdrawal::{RequestWithdrawalInput, RequestWithdrawalUseCase};
pub use review_withdrawals::{ReviewWithdrawalUseCase, SearchWithdrawalsUseCase};
pub use watch_ad::WatchAdUseCase;
