use rand::seq::SliceRandom;
use std::sync::Arc;

use crate::api::error;
use crate::modules::image::{model::ImageOrder, repository::ImageRepository};
use crate::modules::settings::service::SettingsService;
use crate::modules::viewer::model::{ImageView, ViewerPayload};

#[derive(Clone)]
pub struct ViewerService {
    image_repo: Arc<dyn ImageRepository + Send + Sync>,
    settings: SettingsService,
}

impl ViewerService {
    pub fn with_dependencies(
        image_repo: Arc<dyn ImageRepository + Send + Sync>,
        settings: SettingsService,
    ) -> Self {
        ViewerService { image_repo, settings }
    }

    /// Builds the slideshow payload: canonical catalog order plus settings.
    /// With `random_order` on, a copy of the list is shuffled per poll; the
    /// catalog's canonical order and display_order values are never touched.
    pub async fn assemble(&self) -> Result<ViewerPayload, error::SystemError> {
        let images = self.image_repo.list(&ImageOrder::Canonical).await?;
        let settings = self.settings.get_or_create().await?;

        let mut views: Vec<ImageView> = images.into_iter().map(ImageView::from).collect();
        if settings.random_order {
            views.shuffle(&mut rand::thread_rng());
        }

        log::debug!("[Viewer] Returning {} images", views.len());
        Ok(ViewerPayload { images: views, settings: settings.into() })
    }
}
