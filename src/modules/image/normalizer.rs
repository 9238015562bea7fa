use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::api::error;

/// Uploads larger than this are rejected before decoding begins.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Neither output dimension exceeds this; smaller inputs are never enlarged.
pub const MAX_DIMENSION: u32 = 1920;
/// Everything is re-encoded to JPEG at this quality, whatever the input format.
pub const JPEG_QUALITY: u8 = 85;

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];
const ALLOWED_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Result of normalizing one upload: the file is on disk in the upload
/// directory under `stored_filename` when this is returned.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub stored_filename: String,
    pub width: u32,
    pub height: u32,
    pub byte_size: i64,
}

/// Both the declared MIME type and the declared extension must be allowed.
pub fn validate_media_type(mime_type: &str, extension: &str) -> Result<(), error::SystemError> {
    let mime = mime_type.to_ascii_lowercase();
    let ext = extension.to_ascii_lowercase();

    if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) || !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(error::SystemError::unsupported_media_type(format!(
            "only JPG, PNG and WEBP uploads are accepted (got '{mime_type}' / '{extension}')"
        )));
    }
    Ok(())
}

fn decode_resize_encode(bytes: &[u8]) -> Result<(Vec<u8>, u32, u32), error::SystemError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| error::SystemError::invalid_image_data(e.to_string()))?;

    let (width, height) = img.dimensions();
    let img = if width > MAX_DIMENSION || height > MAX_DIMENSION {
        // fit inside MAX_DIMENSION x MAX_DIMENSION, aspect ratio preserved
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        img
    };
    let (width, height) = img.dimensions();

    // JPEG has no alpha channel
    let img = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut encoded), JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(|e| error::SystemError::invalid_image_data(e.to_string()))?;

    Ok((encoded, width, height))
}

pub fn stored_path(upload_dir: &str, filename: &str) -> PathBuf {
    Path::new(upload_dir).join(filename)
}

/// Decode, validate, downsample and re-encode one untrusted upload, writing
/// exactly one file into `upload_dir`. On any failure after a partial write
/// the file is removed; a returned `NormalizedImage` always has a backing file.
pub async fn normalize(
    raw_bytes: Vec<u8>,
    declared_mime: &str,
    declared_extension: &str,
    upload_dir: &str,
) -> Result<NormalizedImage, error::SystemError> {
    if raw_bytes.len() > MAX_UPLOAD_BYTES {
        return Err(error::SystemError::bad_request(format!(
            "File size exceeds maximum allowed size of {MAX_UPLOAD_BYTES} bytes"
        )));
    }

    validate_media_type(declared_mime, declared_extension)?;

    // Bounded resampling is CPU work; keep it off the request executor.
    let (encoded, width, height) =
        tokio::task::spawn_blocking(move || decode_resize_encode(&raw_bytes))
            .await
            .map_err(|e| error::SystemError::Io(std::io::Error::other(e)))??;

    // Opaque token, never derived from the client filename.
    let stored_filename = format!("{}.jpg", Uuid::now_v7());
    let path = stored_path(upload_dir, &stored_filename);

    tokio::fs::create_dir_all(upload_dir).await?;
    if let Err(e) = tokio::fs::write(&path, &encoded).await {
        // no orphan artifacts from failed uploads
        let _ = tokio::fs::remove_file(&path).await;
        return Err(e.into());
    }

    Ok(NormalizedImage { stored_filename, width, height, byte_size: encoded.len() as i64 })
}
