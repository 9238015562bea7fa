use crate::{
    api::error,
    modules::image::{
        model::{ImageOrder, NewImage},
        schema::ImageEntity,
    },
};

#[async_trait::async_trait]
pub trait ImageRepository {
    async fn list(&self, order: &ImageOrder) -> Result<Vec<ImageEntity>, error::SystemError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ImageEntity>, error::SystemError>;

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<ImageEntity>, error::SystemError>;

    async fn create(&self, image: &NewImage) -> Result<ImageEntity, error::SystemError>;

    /// Returns false when the record was already gone (a concurrent delete won).
    async fn delete(&self, id: i64) -> Result<bool, error::SystemError>;
}
