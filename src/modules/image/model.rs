use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::image::schema::ImageEntity;

/// New image metadata to insert into the catalog
#[derive(Debug, Clone)]
pub struct NewImage {
    pub original_name: String,
    pub filename: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub size: i64,
}

/// Upload pipeline configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub upload_dir: String,
    pub base_url: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { upload_dir: "./public/uploads".to_string(), base_url: "/uploads".to_string() }
    }
}

impl UploadConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: crate::ENV.upload_dir.clone(),
            base_url: crate::ENV.public_base_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Catalog ordering. `Canonical` is the viewer baseline: explicit
/// `display_order` first, newest first among unordered records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageOrder {
    Canonical,
    CreatedAt(SortOrder),
    OriginalName(SortOrder),
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListImagesQuery {
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ListImagesQuery {
    /// Admin listing defaults to newest-first when no sort key is given; any
    /// sort key outside the two single-key sorts falls back to canonical order.
    pub fn into_order(self) -> ImageOrder {
        let order = self.sort_order.unwrap_or(SortOrder::Desc);
        match self.sort_by.as_deref() {
            Some("createdAt") | None => ImageOrder::CreatedAt(order),
            Some("originalName") => ImageOrder::OriginalName(order),
            Some(_) => ImageOrder::Canonical,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteManyModel {
    #[validate(length(min = 1, message = "A list of image ids is required"))]
    pub ids: Vec<serde_json::Value>,
}

/// Coerce untrusted id values (numbers or numeric strings) to identifiers,
/// silently dropping anything invalid and de-duplicating the rest.
pub fn coerce_ids(values: &[serde_json::Value]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    values
        .iter()
        .filter_map(|v| match v {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
        .filter(|id| seen.insert(*id))
        .collect()
}

#[derive(Serialize)]
pub struct ImageListBody {
    pub images: Vec<ImageEntity>,
}

#[derive(Serialize)]
pub struct UploadBody {
    pub image: ImageEntity,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteManyBody {
    pub deleted_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_ids_drops_invalid_and_duplicates() {
        let values = vec![json!(3), json!("7"), json!("abc"), json!(3), json!(null), json!(" 9 ")];
        assert_eq!(coerce_ids(&values), vec![3, 7, 9]);
    }

    #[test]
    fn coerce_ids_empty_when_nothing_valid() {
        let values = vec![json!("x"), json!(true), json!(1.5)];
        assert!(coerce_ids(&values).is_empty());
    }

    #[test]
    fn admin_listing_defaults_to_created_at_desc() {
        let q = ListImagesQuery { sort_by: None, sort_order: None };
        assert_eq!(q.into_order(), ImageOrder::CreatedAt(SortOrder::Desc));

        let q = ListImagesQuery {
            sort_by: Some("originalName".to_string()),
            sort_order: Some(SortOrder::Asc),
        };
        assert_eq!(q.into_order(), ImageOrder::OriginalName(SortOrder::Asc));
    }

    #[test]
    fn unrecognized_sort_key_falls_back_to_canonical_order() {
        let q: ListImagesQuery =
            serde_json::from_value(json!({ "sortBy": "default" })).unwrap();
        assert_eq!(q.into_order(), ImageOrder::Canonical);

        let q: ListImagesQuery =
            serde_json::from_value(json!({ "sortBy": "displayOrder", "sortOrder": "asc" }))
                .unwrap();
        assert_eq!(q.into_order(), ImageOrder::Canonical);
    }
}
