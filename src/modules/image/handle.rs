use actix_multipart::Multipart;
use actix_web::{delete, get, post, web, HttpRequest};
use futures_util::TryStreamExt;

use crate::api::{error, success::Success};
use crate::middlewares::get_session;
use crate::modules::image::{
    model::{coerce_ids, DeleteManyBody, DeleteManyModel, ImageListBody, ListImagesQuery, UploadBody},
    normalizer::MAX_UPLOAD_BYTES,
    service::ImageService,
};
use crate::utils::{ValidatedJson, ValidatedQuery};

#[get("/images")]
pub async fn list_images(
    service: web::Data<ImageService>,
    query: ValidatedQuery<ListImagesQuery>,
) -> Result<Success<ImageListBody>, error::Error> {
    let images = service.list(query.0.into_order()).await?;
    Ok(Success::ok(Some(ImageListBody { images })))
}

#[post("/upload")]
pub async fn upload_image(
    mut payload: Multipart,
    req: HttpRequest,
    service: web::Data<ImageService>,
) -> Result<Success<UploadBody>, error::Error> {
    let session = get_session(&req)?;

    while let Some(mut field) =
        payload.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        let Some(content_disposition) = field.content_disposition() else {
            continue;
        };
        let Some(filename) = content_disposition.get_filename().map(str::to_string) else {
            continue;
        };

        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| mime_guess::from_path(&filename).first_or_octet_stream().to_string());

        // Enforce the size cap while streaming so an oversized body is
        // rejected before normalization ever starts.
        let mut bytes = Vec::new();
        while let Some(chunk) =
            field.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
        {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(error::Error::bad_request(format!(
                    "File size exceeds maximum allowed size of {MAX_UPLOAD_BYTES} bytes"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        let image = service.upload(filename, bytes, mime_type).await?;
        log::info!("[Upload] {} uploaded by {}", image.filename, session.sub);
        return Ok(Success::ok(Some(UploadBody { image })).message("Image uploaded"));
    }

    Err(error::Error::bad_request("No file provided"))
}

#[delete("/images/{id}")]
pub async fn delete_image(
    image_id: web::Path<i64>,
    req: HttpRequest,
    service: web::Data<ImageService>,
) -> Result<Success<()>, error::Error> {
    let session = get_session(&req)?;
    let id = image_id.into_inner();
    service.delete_one(id).await?;
    log::info!("[Delete] image {id} removed by {}", session.sub);
    Ok(Success::ok(None).message("Image deleted"))
}

#[post("/images/delete-multiple")]
pub async fn delete_images(
    body: ValidatedJson<DeleteManyModel>,
    req: HttpRequest,
    service: web::Data<ImageService>,
) -> Result<Success<DeleteManyBody>, error::Error> {
    let session = get_session(&req)?;
    let ids = coerce_ids(&body.0.ids);
    if ids.is_empty() {
        return Err(error::Error::bad_request("No valid image ids provided"));
    }

    let deleted_count = service.delete_many(&ids).await?;
    log::info!("[Delete Multiple] {deleted_count} images removed by {}", session.sub);
    Ok(Success::ok(Some(DeleteManyBody { deleted_count }))
        .message(format!("{deleted_count} images deleted")))
}
