use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Catalog record for one normalized image. The backing file lives in the
/// upload directory under `filename`; a record must never outlive its file.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntity {
    pub id: i64,
    pub original_name: String,
    pub filename: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub size: i64,
    pub display_order: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
