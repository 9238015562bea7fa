//! In-memory repository fakes and fixtures shared by the unit tests.

use std::cmp::Ordering;
use std::io::Cursor;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use crate::api::error;
use crate::modules::image::{
    model::{ImageOrder, NewImage, SortOrder},
    repository::ImageRepository,
    schema::ImageEntity,
};
use crate::modules::settings::{
    model::SettingsUpdate,
    repository::SettingsRepository,
    schema::{
        SettingsEntity, DEFAULT_DISPLAY_MODE, DEFAULT_RANDOM_ORDER, DEFAULT_SLIDE_DURATION,
        DEFAULT_TRANSITION_EFFECT, DEFAULT_TRANSITION_SPEED, SETTINGS_ID,
    },
};

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([90, 120, 150]),
    ));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png).unwrap();
    out
}

pub fn temp_dir(prefix: &str) -> String {
    std::env::temp_dir()
        .join(format!("frame-{prefix}-{}", uuid::Uuid::now_v7()))
        .to_string_lossy()
        .into_owned()
}

pub struct MemoryImageRepo {
    images: Mutex<Vec<ImageEntity>>,
    next_id: AtomicI64,
    fail_create: bool,
    vanishing: Mutex<Vec<i64>>,
}

impl MemoryImageRepo {
    pub fn new() -> Self {
        Self {
            images: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_create: false,
            vanishing: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_create() -> Self {
        Self { fail_create: true, ..Self::new() }
    }

    /// Make `delete(id)` behave as if a concurrent request removed the row
    /// between lookup and delete: the row disappears but `delete` reports
    /// that this caller removed nothing.
    pub fn vanish_on_delete(&self, id: i64) {
        self.vanishing.lock().unwrap().push(id);
    }

    pub fn len(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    /// Insert a record directly, bypassing the upload pipeline. `created_at`
    /// increases with the id so recency ordering is deterministic.
    pub fn insert_fixture(&self, filename: &str, display_order: Option<i32>) -> i64 {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let entity = ImageEntity {
            id,
            original_name: filename.to_string(),
            filename: filename.to_string(),
            url: format!("/uploads/{filename}"),
            width: Some(640),
            height: Some(480),
            size: 1024,
            display_order,
            created_at: chrono::Utc::now() + chrono::Duration::seconds(id),
        };
        self.images.lock().unwrap().push(entity);
        id
    }
}

fn canonical_cmp(a: &ImageEntity, b: &ImageEntity) -> Ordering {
    match (a.display_order, b.display_order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| b.created_at.cmp(&a.created_at)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    }
}

#[async_trait::async_trait]
impl ImageRepository for MemoryImageRepo {
    async fn list(&self, order: &ImageOrder) -> Result<Vec<ImageEntity>, error::SystemError> {
        let mut images = self.images.lock().unwrap().clone();
        match order {
            ImageOrder::Canonical => images.sort_by(canonical_cmp),
            ImageOrder::CreatedAt(dir) => {
                images.sort_by(|a, b| a.created_at.cmp(&b.created_at));
                if *dir == SortOrder::Desc {
                    images.reverse();
                }
            }
            ImageOrder::OriginalName(dir) => {
                images.sort_by(|a, b| a.original_name.cmp(&b.original_name));
                if *dir == SortOrder::Desc {
                    images.reverse();
                }
            }
        }
        Ok(images)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ImageEntity>, error::SystemError> {
        Ok(self.images.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<ImageEntity>, error::SystemError> {
        Ok(self.images.lock().unwrap().iter().filter(|i| ids.contains(&i.id)).cloned().collect())
    }

    async fn create(&self, image: &NewImage) -> Result<ImageEntity, error::SystemError> {
        if self.fail_create {
            return Err(error::SystemError::DatabaseError("injected create failure".into()));
        }
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let entity = ImageEntity {
            id,
            original_name: image.original_name.clone(),
            filename: image.filename.clone(),
            url: image.url.clone(),
            width: image.width,
            height: image.height,
            size: image.size,
            display_order: None,
            created_at: chrono::Utc::now() + chrono::Duration::seconds(id),
        };
        self.images.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let mut images = self.images.lock().unwrap();
        let before = images.len();
        images.retain(|i| i.id != id);
        if self.vanishing.lock().unwrap().contains(&id) {
            return Ok(false);
        }
        Ok(images.len() < before)
    }
}

pub struct MemorySettingsRepo {
    row: Mutex<Option<SettingsEntity>>,
    inserts: AtomicUsize,
}

fn default_settings() -> SettingsEntity {
    SettingsEntity {
        id: SETTINGS_ID,
        slide_duration: DEFAULT_SLIDE_DURATION,
        transition_effect: DEFAULT_TRANSITION_EFFECT.to_string(),
        transition_speed: DEFAULT_TRANSITION_SPEED,
        display_mode: DEFAULT_DISPLAY_MODE.to_string(),
        random_order: DEFAULT_RANDOM_ORDER,
    }
}

impl MemorySettingsRepo {
    pub fn new() -> Self {
        Self { row: Mutex::new(None), inserts: AtomicUsize::new(0) }
    }

    pub fn with_random_order(random_order: bool) -> Self {
        let repo = Self::new();
        *repo.row.lock().unwrap() = Some(SettingsEntity { random_order, ..default_settings() });
        repo
    }

    pub fn insert_attempts(&self) -> usize {
        self.inserts.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SettingsRepository for MemorySettingsRepo {
    async fn find(&self) -> Result<Option<SettingsEntity>, error::SystemError> {
        Ok(self.row.lock().unwrap().clone())
    }

    async fn insert_defaults(&self) -> Result<Option<SettingsEntity>, error::SystemError> {
        self.inserts.fetch_add(1, AtomicOrdering::SeqCst);
        let mut row = self.row.lock().unwrap();
        if row.is_some() {
            return Ok(None);
        }
        let settings = default_settings();
        *row = Some(settings.clone());
        Ok(Some(settings))
    }

    async fn upsert(&self, update: &SettingsUpdate) -> Result<SettingsEntity, error::SystemError> {
        let settings = SettingsEntity {
            id: SETTINGS_ID,
            slide_duration: update.slide_duration,
            transition_effect: update.transition_effect.clone(),
            transition_speed: update.transition_speed,
            display_mode: update.display_mode.clone(),
            random_order: update.random_order,
        };
        *self.row.lock().unwrap() = Some(settings.clone());
        Ok(settings)
    }
}
