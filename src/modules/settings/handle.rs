use actix_web::{get, put, web};

use crate::api::{error, success::Success};
use crate::modules::settings::{
    model::{SettingsBody, UpdateSettingsModel},
    service::SettingsService,
};
use crate::utils::ValidatedJson;

#[get("/settings")]
pub async fn get_settings(
    service: web::Data<SettingsService>,
) -> Result<Success<SettingsBody>, error::Error> {
    let settings = service.get_or_create().await?;
    Ok(Success::ok(Some(SettingsBody { settings })))
}

#[put("/settings")]
pub async fn update_settings(
    service: web::Data<SettingsService>,
    body: ValidatedJson<UpdateSettingsModel>,
) -> Result<Success<SettingsBody>, error::Error> {
    let settings = service.upsert(body.0).await?;
    Ok(Success::ok(Some(SettingsBody { settings })))
}
