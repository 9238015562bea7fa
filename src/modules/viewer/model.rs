use serde::Serialize;

use crate::modules::image::schema::ImageEntity;
use crate::modules::settings::schema::SettingsEntity;

/// Reduced projection served to viewer clients; internal fields such as byte
/// size and display order are not exposed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub id: i64,
    pub original_name: String,
    pub filename: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl From<ImageEntity> for ImageView {
    fn from(entity: ImageEntity) -> Self {
        ImageView {
            id: entity.id,
            original_name: entity.original_name,
            filename: entity.filename,
            url: entity.url,
            width: entity.width,
            height: entity.height,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub slide_duration: i32,
    pub transition_effect: String,
    pub transition_speed: i32,
    pub display_mode: String,
    pub random_order: bool,
}

impl From<SettingsEntity> for SettingsView {
    fn from(entity: SettingsEntity) -> Self {
        SettingsView {
            slide_duration: entity.slide_duration,
            transition_effect: entity.transition_effect,
            transition_speed: entity.transition_speed,
            display_mode: entity.display_mode,
            random_order: entity.random_order,
        }
    }
}

#[derive(Serialize)]
pub struct ViewerPayload {
    pub images: Vec<ImageView>,
    pub settings: SettingsView,
}
