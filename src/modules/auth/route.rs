use crate::modules::auth::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/auth").service(login).service(logout).service(status));
}
