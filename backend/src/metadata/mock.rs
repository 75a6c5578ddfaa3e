//! In-memory metadata store for tests

use std::sync::Mutex;

use aws_sdk_dynamodb::error::SdkError;
use backend_storage::image_record::{
    ImageRecord, ImageRecordStorageError, ImageRecordStorageResult, NewImageRecord,
};
use uuid::Uuid;

use super::MetadataStore;

/// Metadata store that keeps records in insertion order
#[derive(Default)]
pub struct InMemoryMetadataStore {
    records: Mutex<Vec<ImageRecord>>,
    fail_inserts: bool,
}

impl InMemoryMetadataStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose inserts always time out
    #[must_use]
    pub fn failing() -> Self {
        Self {
            records: Mutex::default(),
            fail_inserts: true,
        }
    }

    /// Returns a snapshot of the stored records
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned
    #[must_use]
    pub fn records(&self) -> Vec<ImageRecord> {
        self.records
            .lock()
            .expect("metadata store lock poisoned")
            .clone()
    }
}

#[async_trait::async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(&self, record: NewImageRecord) -> ImageRecordStorageResult<ImageRecord> {
        if self.fail_inserts {
            return Err(ImageRecordStorageError::DynamoDbPutError(
                SdkError::timeout_error("DynamoDB unavailable"),
            ));
        }

        let record = record.with_id(Uuid::new_v4().to_string());
        self.records
            .lock()
            .expect("metadata store lock poisoned")
            .push(record.clone());

        Ok(record)
    }

    async fn list(&self) -> ImageRecordStorageResult<Vec<ImageRecord>> {
        Ok(self.records())
    }
}
