use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// The settings row is a singleton pinned to this id.
pub const SETTINGS_ID: i32 = 1;

pub const DEFAULT_SLIDE_DURATION: i32 = 10_000;
pub const DEFAULT_TRANSITION_EFFECT: &str = "fade";
pub const DEFAULT_TRANSITION_SPEED: i32 = 1_000;
pub const DEFAULT_DISPLAY_MODE: &str = "cover";
pub const DEFAULT_RANDOM_ORDER: bool = false;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsEntity {
    pub id: i32,
    pub slide_duration: i32,
    pub transition_effect: String,
    pub transition_speed: i32,
    pub display_mode: String,
    pub random_order: bool,
}
