//! Metadata store seam over image record storage
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

use backend_storage::image_record::{
    ImageRecord, ImageRecordStorage, ImageRecordStorageResult, NewImageRecord,
};

/// Document collection holding one record per uploaded image
#[async_trait::async_trait]
pub trait MetadataStore: Send + Sync {
    /// Inserts a record; the store assigns its id
    async fn insert(&self, record: NewImageRecord) -> ImageRecordStorageResult<ImageRecord>;

    /// Returns every record, in store order
    async fn list(&self) -> ImageRecordStorageResult<Vec<ImageRecord>>;
}

#[async_trait::async_trait]
impl MetadataStore for ImageRecordStorage {
    async fn insert(&self, record: NewImageRecord) -> ImageRecordStorageResult<ImageRecord> {
        Self::insert(self, &record).await
    }

    async fn list(&self) -> ImageRecordStorageResult<Vec<ImageRecord>> {
        self.list_all().await
    }
}
