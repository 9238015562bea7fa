use crate::{
    api::error,
    modules::settings::{
        model::SettingsUpdate,
        repository::SettingsRepository,
        schema::{
            SettingsEntity, DEFAULT_DISPLAY_MODE, DEFAULT_RANDOM_ORDER, DEFAULT_SLIDE_DURATION,
            DEFAULT_TRANSITION_EFFECT, DEFAULT_TRANSITION_SPEED, SETTINGS_ID,
        },
    },
};

#[derive(Clone)]
pub struct SettingsPgRepository {
    pool: sqlx::PgPool,
}

impl SettingsPgRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SettingsRepository for SettingsPgRepository {
    async fn find(&self) -> Result<Option<SettingsEntity>, error::SystemError> {
        let settings = sqlx::query_as::<_, SettingsEntity>(
            r#"
            SELECT * FROM settings WHERE id = $1
            "#,
        )
        .bind(SETTINGS_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    async fn insert_defaults(&self) -> Result<Option<SettingsEntity>, error::SystemError> {
        let settings = sqlx::query_as::<_, SettingsEntity>(
            r#"
            INSERT INTO settings (id, slide_duration, transition_effect, transition_speed, display_mode, random_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(SETTINGS_ID)
        .bind(DEFAULT_SLIDE_DURATION)
        .bind(DEFAULT_TRANSITION_EFFECT)
        .bind(DEFAULT_TRANSITION_SPEED)
        .bind(DEFAULT_DISPLAY_MODE)
        .bind(DEFAULT_RANDOM_ORDER)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    async fn upsert(&self, update: &SettingsUpdate) -> Result<SettingsEntity, error::SystemError> {
        let settings = sqlx::query_as::<_, SettingsEntity>(
            r#"
            INSERT INTO settings (id, slide_duration, transition_effect, transition_speed, display_mode, random_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                slide_duration = EXCLUDED.slide_duration,
                transition_effect = EXCLUDED.transition_effect,
                transition_speed = EXCLUDED.transition_speed,
                display_mode = EXCLUDED.display_mode,
                random_order = EXCLUDED.random_order
            RETURNING *
            "#,
        )
        .bind(SETTINGS_ID)
        .bind(update.slide_duration)
        .bind(&update.transition_effect)
        .bind(update.transition_speed)
        .bind(&update.display_mode)
        .bind(update.random_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
