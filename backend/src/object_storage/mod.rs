//! S3-based object storage operations
mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

use std::sync::Arc;

use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use axum::body::Bytes;
use tracing::{debug, error};

pub use error::{BucketError, BucketResult};

/// Durable key-addressed blob storage
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `data` under `key` with the given content type attached
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> BucketResult<()>;
}

/// Object storage client for S3 operations
pub struct S3ObjectStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3ObjectStorage {
    /// Creates a new object storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for uploaded images
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStorage {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> BucketResult<()> {
        let content_length = i64::try_from(data.len()).unwrap_or(i64::MAX);

        debug!(key, content_length, content_type, "Uploading object");

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .content_length(content_length)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to upload object {key}: {e}");
                BucketError::from(e)
            })?;

        Ok(())
    }
}
