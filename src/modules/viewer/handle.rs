use actix_web::{get, web};

use crate::api::{error, success::Success};
use crate::modules::viewer::{model::ViewerPayload, service::ViewerService};

#[get("/images")]
pub async fn viewer_images(
    service: web::Data<ViewerService>,
) -> Result<Success<ViewerPayload>, error::Error> {
    let payload = service.assemble().await?;
    Ok(Success::ok(Some(payload)))
}
