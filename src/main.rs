use actix_web::{
    self, App, HttpServer,
    middleware::{from_fn, Logger},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, ensure_upload_dir},
    middlewares::authentication,
    modules::{
        auth::service::AuthService,
        image::{model::UploadConfig, repository_pg::ImagePgRepository, service::ImageService},
        settings::{repository_pg::SettingsPgRepository, service::SettingsService},
        viewer::service::ViewerService,
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    ensure_upload_dir()
        .await
        .map_err(|_| std::io::Error::other("Upload directory creation error"))?;

    let image_repo = Arc::new(ImagePgRepository::new(db_pool.clone()));
    let settings_repo = Arc::new(SettingsPgRepository::new(db_pool.clone()));

    let image_service =
        ImageService::with_dependencies(image_repo.clone(), UploadConfig::from_env());
    let settings_service = SettingsService::with_dependencies(settings_repo);
    let viewer_service = ViewerService::with_dependencies(image_repo, settings_service.clone());
    let auth_service =
        AuthService::from_env().map_err(|_| std::io::Error::other("Credential setup error"))?;

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(image_service.clone()))
            .app_data(web::Data::new(settings_service.clone()))
            .app_data(web::Data::new(viewer_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .service(health_check)
            .service(
                web::scope("/api")
                    .configure(modules::viewer::route::configure)
                    .configure(modules::auth::route::configure)
                    .service(
                        web::scope("/admin")
                            .wrap(from_fn(authentication))
                            .configure(modules::image::route::configure)
                            .configure(modules::settings::route::configure),
                    ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
