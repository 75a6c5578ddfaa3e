//! Upload and list coordination
//!
//! An upload is a straight line: validate the content type, store the bytes in the
//! bucket, then record a metadata document pointing at them. The two writes are not
//! transactional. When the metadata insert fails the object stays in the bucket with
//! no record referencing it; the key is logged and the failure is returned as is.

use std::path::Path;
use std::sync::Arc;

use backend_storage::image_record::{ImageRecord, ImageRecordStorageError, NewImageRecord};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    metadata::MetadataStore,
    object_storage::{BucketError, ObjectStore},
    types::ImageUpload,
};

/// Prefix every accepted content type must start with
const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Result type for coordinator operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can occur while uploading or listing images
#[derive(Error, Debug)]
pub enum UploadError {
    /// Declared content type is missing or not `image/*`
    #[error("Invalid image file, content type: {0:?}")]
    InvalidContentType(Option<String>),

    /// Object store write failed
    #[error(transparent)]
    ObjectStore(#[from] BucketError),

    /// Metadata store operation failed
    #[error(transparent)]
    MetadataStore(#[from] ImageRecordStorageError),
}

/// Public view of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImageSummary {
    /// Record id assigned by the metadata store
    pub id: String,
    /// Filename as uploaded
    pub filename: String,
    /// Public URL of the stored object
    pub url: String,
}

impl From<ImageRecord> for ImageSummary {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            url: record.url,
        }
    }
}

/// Returns whether the declared content type is an image type
#[must_use]
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.starts_with(IMAGE_CONTENT_TYPE_PREFIX))
}

/// Generates a fresh object key, keeping the extension of `filename`
///
/// `photo.png` becomes `<uuid>.png`; names without an extension (including
/// dot-files such as `.bashrc`) get a bare `<uuid>`.
#[must_use]
pub fn generate_storage_key(filename: &str) -> String {
    let token = Uuid::new_v4();
    match Path::new(filename).extension() {
        Some(ext) => format!("{token}.{}", ext.to_string_lossy()),
        None => token.to_string(),
    }
}

/// Public URL of an object, derived only from bucket, region and key
#[must_use]
pub fn object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

/// Sequences object store and metadata store operations for each request
pub struct UploadCoordinator {
    object_store: Arc<dyn ObjectStore>,
    metadata_store: Arc<dyn MetadataStore>,
    bucket_name: String,
    region: String,
}

impl UploadCoordinator {
    /// Creates a new coordinator
    ///
    /// # Arguments
    ///
    /// * `object_store` - Long-lived object store handle
    /// * `metadata_store` - Long-lived metadata store handle
    /// * `bucket_name` - Bucket the object store writes to, used for URLs
    /// * `region` - Region of the bucket, used for URLs
    #[must_use]
    pub const fn new(
        object_store: Arc<dyn ObjectStore>,
        metadata_store: Arc<dyn MetadataStore>,
        bucket_name: String,
        region: String,
    ) -> Self {
        Self {
            object_store,
            metadata_store,
            bucket_name,
            region,
        }
    }

    /// Stores an uploaded image and records its metadata
    ///
    /// # Errors
    ///
    /// Returns `UploadError::InvalidContentType` without writing anything when the
    /// content type is not `image/*`, `UploadError::ObjectStore` when the object
    /// upload fails and `UploadError::MetadataStore` when the insert fails after
    /// the object was stored
    pub async fn upload(&self, upload: ImageUpload) -> UploadResult<ImageSummary> {
        let ImageUpload {
            filename,
            content_type,
            data,
        } = upload;

        let content_type = match content_type {
            Some(ct) if is_image_content_type(Some(ct.as_str())) => ct,
            other => return Err(UploadError::InvalidContentType(other)),
        };

        let storage_key = generate_storage_key(&filename);

        self.object_store
            .put_object(&storage_key, data, &content_type)
            .await?;

        let url = object_url(&self.bucket_name, &self.region, &storage_key);

        let record = self
            .metadata_store
            .insert(NewImageRecord {
                filename,
                storage_key: storage_key.clone(),
                url,
            })
            .await
            .map_err(|e| {
                error!(
                    storage_key = %storage_key,
                    "Metadata insert failed after object upload, object has no record: {e}"
                );
                e
            })?;

        info!(id = %record.id, storage_key = %record.storage_key, "Stored image");

        Ok(record.into())
    }

    /// Lists every recorded image
    ///
    /// # Errors
    ///
    /// Returns `UploadError::MetadataStore` if the scan fails
    pub async fn list(&self) -> UploadResult<Vec<ImageSummary>> {
        let records = self.metadata_store.list().await.map_err(|e| {
            error!("Failed to list image records: {e}");
            e
        })?;
        Ok(records.into_iter().map(ImageSummary::from).collect())
    }
}
