use crate::modules::image::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(list_images)
        .service(upload_image)
        .service(delete_images)
        .service(delete_image);
}
