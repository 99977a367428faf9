//! Admin Settings Use Cases

use std::sync::Arc;

use serde_json::Value;

use crate::domain::entity::settings::Settings;
use crate::domain::repository::SettingsRepository;
use crate::error::LedgerResult;

pub struct GetSettingsUseCase<S>
where
    S: SettingsRepository,
{
    settings_repo: Arc<S>,
}

impl<S> GetSettingsUseCase<S>
where
    S: SettingsRepository,
{
    pub fn new(settings_repo: Arc<S>) -> Self {
        Self { settings_repo }
    }

    pub async fn execute(&self) -> LedgerResult<Settings> {
        self.settings_repo.load().await
    }
}

/// Merge the provided keys into the stored settings under the record lock.
/// The stored record is only replaced if the merged result validates.
pub struct UpdateSettingsUseCase<S>
where
    S: SettingsRepository,
{
    settings_repo: Arc<S>,
}

impl<S> UpdateSettingsUseCase<S>
where
    S: SettingsRepository,
{
    pub fn new(settings_repo: Arc<S>) -> Self {
        Self { settings_repo }
    }

    pub async fn execute(&self, patch: &Value) -> LedgerResult<Settings> {
        let updated = self
            .settings_repo
            .update_settings_with(|settings| {
                *settings = settings.apply_patch(patch)?;
                Ok(())
            })
            .await?;

        tracing::info!(
            event_multiplier = updated.event_multiplier,
            daily_bonus_enabled = updated.daily_bonus.enabled,
            "Settings updated"
        );

        Ok(updated)
    }
}
