use crate::{
    api::error,
    modules::image::{
        model::{ImageOrder, NewImage, SortOrder},
        repository::ImageRepository,
        schema::ImageEntity,
    },
};

#[derive(Clone)]
pub struct ImagePgRepository {
    pool: sqlx::PgPool,
}

impl ImagePgRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

// Sort keys map onto static SQL fragments only; nothing caller-supplied is
// spliced into the query text.
fn order_clause(order: &ImageOrder) -> &'static str {
    match order {
        ImageOrder::Canonical => "display_order ASC NULLS LAST, created_at DESC",
        ImageOrder::CreatedAt(SortOrder::Asc) => "created_at ASC",
        ImageOrder::CreatedAt(SortOrder::Desc) => "created_at DESC",
        ImageOrder::OriginalName(SortOrder::Asc) => "original_name ASC",
        ImageOrder::OriginalName(SortOrder::Desc) => "original_name DESC",
    }
}

#[async_trait::async_trait]
impl ImageRepository for ImagePgRepository {
    async fn list(&self, order: &ImageOrder) -> Result<Vec<ImageEntity>, error::SystemError> {
        let query = format!("SELECT * FROM images ORDER BY {}", order_clause(order));
        let images = sqlx::query_as::<_, ImageEntity>(&query).fetch_all(&self.pool).await?;

        Ok(images)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ImageEntity>, error::SystemError> {
        let image = sqlx::query_as::<_, ImageEntity>(
            r#"
            SELECT * FROM images WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<ImageEntity>, error::SystemError> {
        let images = sqlx::query_as::<_, ImageEntity>(
            r#"
            SELECT * FROM images WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn create(&self, image: &NewImage) -> Result<ImageEntity, error::SystemError> {
        let entity = sqlx::query_as::<_, ImageEntity>(
            r#"
            INSERT INTO images (original_name, filename, url, width, height, size)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&image.original_name)
        .bind(&image.filename)
        .bind(&image.url)
        .bind(image.width)
        .bind(image.height)
        .bind(image.size)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let result = sqlx::query(
            r#"
            DELETE FROM images WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
