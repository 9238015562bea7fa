use futures_util::future::join_all;
use std::path::Path;
use std::sync::Arc;

use crate::api::error;
use crate::modules::image::{
    model::{ImageOrder, NewImage, UploadConfig},
    normalizer,
    repository::ImageRepository,
    schema::ImageEntity,
};

#[derive(Clone)]
pub struct ImageService {
    repo: Arc<dyn ImageRepository + Send + Sync>,
    config: UploadConfig,
}

impl ImageService {
    pub fn with_dependencies(
        repo: Arc<dyn ImageRepository + Send + Sync>,
        config: UploadConfig,
    ) -> Self {
        ImageService { repo, config }
    }

    fn declared_extension(original_name: &str) -> String {
        Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default()
    }

    /// Upload pipeline: normalize to a bounded JPEG on disk, then commit the
    /// catalog record. File write precedes record create, so a failure in
    /// between leaves at worst an orphan file, never a dangling record.
    pub async fn upload(
        &self,
        original_name: String,
        bytes: Vec<u8>,
        mime_type: String,
    ) -> Result<ImageEntity, error::SystemError> {
        let extension = Self::declared_extension(&original_name);
        let normalized =
            normalizer::normalize(bytes, &mime_type, &extension, &self.config.upload_dir).await?;

        let new_image = NewImage {
            original_name,
            filename: normalized.stored_filename.clone(),
            url: format!("{}/{}", self.config.base_url, normalized.stored_filename),
            width: Some(normalized.width as i32),
            height: Some(normalized.height as i32),
            size: normalized.byte_size,
        };

        match self.repo.create(&new_image).await {
            Ok(entity) => {
                log::info!("[Upload] Success: {}", entity.filename);
                Ok(entity)
            }
            Err(e) => {
                // The file landed but the record never committed; reclaim it.
                let path =
                    normalizer::stored_path(&self.config.upload_dir, &normalized.stored_filename);
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    log::warn!(
                        "[Upload] Failed to remove {} after record-create failure: {}",
                        path.display(),
                        rm
                    );
                }
                Err(e)
            }
        }
    }

    pub async fn list(&self, order: ImageOrder) -> Result<Vec<ImageEntity>, error::SystemError> {
        self.repo.list(&order).await
    }

    /// A missing file is tolerated (the record is the authority); any other
    /// filesystem error aborts before the record is touched.
    async fn unlink_tolerant(&self, filename: &str) -> Result<(), error::SystemError> {
        let path = normalizer::stored_path(&self.config.upload_dir, filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_one(&self, id: i64) -> Result<(), error::SystemError> {
        let image = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Image not found"))?;

        // File removal precedes record removal: a crash in between leaves an
        // orphan file, never a record without a backing file.
        self.unlink_tolerant(&image.filename).await?;

        if !self.repo.delete(id).await? {
            // a concurrent delete got there first
            return Err(error::SystemError::not_found("Image not found"));
        }

        log::info!("[Delete] Success: {}", image.filename);
        Ok(())
    }

    /// Bulk delete fans out per-record unlink+delete concurrently; each record
    /// touches a disjoint file and row, so no coordination is needed. Failed
    /// records are surfaced in aggregate after the rest complete.
    pub async fn delete_many(&self, ids: &[i64]) -> Result<usize, error::SystemError> {
        let images = self.repo.find_by_ids(ids).await?;
        if images.is_empty() {
            return Err(error::SystemError::not_found("No matching images to delete"));
        }

        let results = join_all(images.into_iter().map(|image| {
            let service = self.clone();
            async move {
                service.unlink_tolerant(&image.filename).await?;
                // false means a concurrent delete got there first; that record
                // is gone but this request did not delete it
                Ok::<_, error::SystemError>(service.repo.delete(image.id).await?)
            }
        }))
        .await;

        let deleted = results.iter().filter(|r| matches!(r, Ok(true))).count();
        let failed = results.iter().filter(|r| r.is_err()).count();
        for err in results.into_iter().filter_map(Result::err) {
            log::error!("[Delete Multiple] {}", err);
        }

        if failed > 0 {
            return Err(error::SystemError::BulkDeleteIncomplete { deleted, failed });
        }

        log::info!("[Delete Multiple] Success: {} images deleted", deleted);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{png_bytes, temp_dir, MemoryImageRepo};

    fn service(repo: Arc<MemoryImageRepo>, dir: &str) -> ImageService {
        let config =
            UploadConfig { upload_dir: dir.to_string(), base_url: "/uploads".to_string() };
        ImageService::with_dependencies(repo, config)
    }

    #[tokio::test]
    async fn upload_creates_record_and_file() {
        let dir = temp_dir("image-service");
        let repo = Arc::new(MemoryImageRepo::new());
        let svc = service(repo.clone(), &dir);

        let image = svc
            .upload("My Photo.PNG".to_string(), png_bytes(2400, 1200), "image/png".to_string())
            .await
            .unwrap();

        assert_eq!(image.original_name, "My Photo.PNG");
        assert_eq!(image.width, Some(1920));
        assert_eq!(image.height, Some(960));
        assert_eq!(image.url, format!("/uploads/{}", image.filename));
        assert!(normalizer::stored_path(&dir, &image.filename).exists());
        assert_eq!(repo.len(), 1);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn failed_record_create_removes_the_file() {
        let dir = temp_dir("image-service");
        let repo = Arc::new(MemoryImageRepo::failing_create());
        let svc = service(repo, &dir);

        let err = svc
            .upload("a.png".to_string(), png_bytes(100, 100), "image/png".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::DatabaseError(_)));

        // the partial artifact was reclaimed
        let leftover = std::fs::read_dir(&dir).map(|d| d.count()).unwrap_or(0);
        assert_eq!(leftover, 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_second_time() {
        let dir = temp_dir("image-service");
        let repo = Arc::new(MemoryImageRepo::new());
        let svc = service(repo.clone(), &dir);

        let image = svc
            .upload("a.png".to_string(), png_bytes(50, 50), "image/png".to_string())
            .await
            .unwrap();

        svc.delete_one(image.id).await.unwrap();
        assert!(!normalizer::stored_path(&dir, &image.filename).exists());

        let err = svc.delete_one(image.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn delete_tolerates_already_missing_file() {
        let dir = temp_dir("image-service");
        let repo = Arc::new(MemoryImageRepo::new());
        let svc = service(repo.clone(), &dir);

        // record exists, backing file never written (orphan-record scenario)
        let id = repo.insert_fixture("ghost.jpg", None);
        svc.delete_one(id).await.unwrap();
        assert_eq!(repo.len(), 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn delete_many_counts_only_existing_records() {
        let dir = temp_dir("image-service");
        let repo = Arc::new(MemoryImageRepo::new());
        let svc = service(repo.clone(), &dir);

        let a = svc
            .upload("a.png".to_string(), png_bytes(20, 20), "image/png".to_string())
            .await
            .unwrap();
        let b = svc
            .upload("b.png".to_string(), png_bytes(20, 20), "image/png".to_string())
            .await
            .unwrap();

        let deleted = svc.delete_many(&[a.id, b.id, 99_999]).await.unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(repo.len(), 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn delete_many_surfaces_partial_failures_in_aggregate() {
        let dir = temp_dir("image-service");
        let repo = Arc::new(MemoryImageRepo::new());
        let svc = service(repo.clone(), &dir);

        let a = svc
            .upload("a.png".to_string(), png_bytes(20, 20), "image/png".to_string())
            .await
            .unwrap();
        let b = svc
            .upload("b.png".to_string(), png_bytes(20, 20), "image/png".to_string())
            .await
            .unwrap();

        // Replace b's backing file with a non-empty directory so its unlink
        // fails with something other than NotFound.
        let b_path = normalizer::stored_path(&dir, &b.filename);
        std::fs::remove_file(&b_path).unwrap();
        std::fs::create_dir(&b_path).unwrap();
        std::fs::write(b_path.join("pin"), b"x").unwrap();

        let err = svc.delete_many(&[a.id, b.id]).await.unwrap_err();
        assert!(matches!(
            err,
            error::SystemError::BulkDeleteIncomplete { deleted: 1, failed: 1 }
        ));

        // a completed fully; b's record was not touched after its unlink failed
        assert!(!normalizer::stored_path(&dir, &a.filename).exists());
        assert_eq!(repo.len(), 1);
        assert!(repo.find_by_id(b.id).await.unwrap().is_some());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn delete_many_does_not_count_records_lost_to_a_concurrent_delete() {
        let dir = temp_dir("image-service");
        let repo = Arc::new(MemoryImageRepo::new());
        let svc = service(repo.clone(), &dir);

        let a = repo.insert_fixture("a.jpg", None);
        let b = repo.insert_fixture("b.jpg", None);
        repo.vanish_on_delete(b);

        let deleted = svc.delete_many(&[a, b]).await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(repo.len(), 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn delete_many_with_no_matches_is_not_found() {
        let dir = temp_dir("image-service");
        let repo = Arc::new(MemoryImageRepo::new());
        let svc = service(repo, &dir);

        let err = svc.delete_many(&[1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
        std::fs::remove_dir_all(&dir).ok();
    }
}
