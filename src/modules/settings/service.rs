use std::sync::Arc;

use crate::api::error;
use crate::modules::settings::{
    model::{SettingsUpdate, UpdateSettingsModel},
    repository::SettingsRepository,
    schema::SettingsEntity,
};

#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository + Send + Sync>,
}

impl SettingsService {
    pub fn with_dependencies(repo: Arc<dyn SettingsRepository + Send + Sync>) -> Self {
        SettingsService { repo }
    }

    /// The singleton accessor. First read creates the row with defaults;
    /// concurrent first reads race to insert and the store's key constraint
    /// leaves exactly one surviving row.
    pub async fn get_or_create(&self) -> Result<SettingsEntity, error::SystemError> {
        if let Some(settings) = self.repo.find().await? {
            return Ok(settings);
        }

        if let Some(settings) = self.repo.insert_defaults().await? {
            log::info!("[Settings] Created default settings");
            return Ok(settings);
        }

        // a concurrent creator won; the row must exist now
        self.repo.find().await?.ok_or_else(|| {
            error::SystemError::DatabaseError("settings row missing after insert".into())
        })
    }

    pub async fn upsert(
        &self,
        model: UpdateSettingsModel,
    ) -> Result<SettingsEntity, error::SystemError> {
        let update = SettingsUpdate::from(model);
        self.repo.upsert(&update).await
    }
}
