use std::sync::Arc;

use axum::{Extension, Json};
use tracing::instrument;

use crate::{
    types::{AppError, ImageUpload},
    uploads::{ImageSummary, UploadCoordinator},
};

/// Uploads an image and records its metadata
///
/// Expects a `multipart/form-data` body with the image in the `file` field.
/// The object is stored under a random key that keeps the original extension.
///
/// # Errors
///
/// - 400 `invalid_image_file` when the file's content type is not `image/*`
/// - 400 when the body is not multipart or has no named `file` part
/// - 413 when the body exceeds the upload limit
/// - 500 when the object store or the metadata store fails
#[instrument(skip_all, fields(filename = %upload.filename))]
pub async fn upload_image(
    Extension(coordinator): Extension<Arc<UploadCoordinator>>,
    upload: ImageUpload,
) -> Result<Json<ImageSummary>, AppError> {
    let summary = coordinator.upload(upload).await?;
    Ok(Json(summary))
}

/// Lists every uploaded image
///
/// No pagination and no ordering guarantee.
///
/// # Errors
///
/// Returns 500 when the metadata store scan fails
#[instrument(skip_all)]
pub async fn list_images(
    Extension(coordinator): Extension<Arc<UploadCoordinator>>,
) -> Result<Json<Vec<ImageSummary>>, AppError> {
    let images = coordinator.list().await?;
    tracing::debug!(count = images.len(), "Listed images");
    Ok(Json(images))
}
