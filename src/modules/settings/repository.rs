use crate::{
    api::error,
    modules::settings::{model::SettingsUpdate, schema::SettingsEntity},
};

#[async_trait::async_trait]
pub trait SettingsRepository {
    async fn find(&self) -> Result<Option<SettingsEntity>, error::SystemError>;

    /// Insert the default row if none exists. Returns `None` when a concurrent
    /// creator won the race (the store's primary-key constraint arbitrates).
    async fn insert_defaults(&self) -> Result<Option<SettingsEntity>, error::SystemError>;

    async fn upsert(&self, update: &SettingsUpdate) -> Result<SettingsEntity, error::SystemError>;
}
