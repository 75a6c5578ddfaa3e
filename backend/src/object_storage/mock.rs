//! In-memory object store for tests

use std::sync::Mutex;

use axum::body::Bytes;

use super::{BucketError, BucketResult, ObjectStore};

/// Object captured by [`InMemoryObjectStore`]
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Object key
    pub key: String,
    /// Object body
    pub data: Bytes,
    /// Content type sent with the upload
    pub content_type: String,
}

/// Object store that keeps every upload in memory
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<Vec<StoredObject>>,
    fail_uploads: bool,
}

impl InMemoryObjectStore {
    /// Creates an empty store that accepts every upload
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects every upload with an upstream error
    #[must_use]
    pub fn failing() -> Self {
        Self {
            objects: Mutex::default(),
            fail_uploads: true,
        }
    }

    /// Returns a snapshot of the stored objects in upload order
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned
    #[must_use]
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().expect("object store lock poisoned").clone()
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> BucketResult<()> {
        if self.fail_uploads {
            return Err(BucketError::UpstreamError(
                "S3 service temporarily unavailable".to_string(),
            ));
        }

        self.objects
            .lock()
            .expect("object store lock poisoned")
            .push(StoredObject {
                key: key.to_string(),
                data,
                content_type: content_type.to_string(),
            });

        Ok(())
    }
}
