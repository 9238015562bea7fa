use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::settings::schema::{
    SettingsEntity, DEFAULT_DISPLAY_MODE, DEFAULT_RANDOM_ORDER, DEFAULT_SLIDE_DURATION,
    DEFAULT_TRANSITION_EFFECT, DEFAULT_TRANSITION_SPEED,
};

/// Partial update from the admin UI. Transition/display tokens are persisted
/// verbatim without checking them against a known set; viewer clients treat
/// unknown tokens as "fade"/"cover" themselves.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsModel {
    #[validate(range(min = 1, message = "slideDuration must be a positive number of ms"))]
    pub slide_duration: Option<i32>,
    pub transition_effect: Option<String>,
    #[validate(range(min = 1, message = "transitionSpeed must be a positive number of ms"))]
    pub transition_speed: Option<i32>,
    pub display_mode: Option<String>,
    pub random_order: Option<bool>,
}

/// Fully-resolved settings values to persist; every absent input field has
/// been substituted with its domain default.
#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    pub slide_duration: i32,
    pub transition_effect: String,
    pub transition_speed: i32,
    pub display_mode: String,
    pub random_order: bool,
}

impl From<UpdateSettingsModel> for SettingsUpdate {
    fn from(model: UpdateSettingsModel) -> Self {
        SettingsUpdate {
            slide_duration: model.slide_duration.unwrap_or(DEFAULT_SLIDE_DURATION),
            transition_effect: model
                .transition_effect
                .unwrap_or_else(|| DEFAULT_TRANSITION_EFFECT.to_string()),
            transition_speed: model.transition_speed.unwrap_or(DEFAULT_TRANSITION_SPEED),
            display_mode: model.display_mode.unwrap_or_else(|| DEFAULT_DISPLAY_MODE.to_string()),
            random_order: model.random_order.unwrap_or(DEFAULT_RANDOM_ORDER),
        }
    }
}

#[derive(Serialize)]
pub struct SettingsBody {
    pub settings: SettingsEntity,
}
