//! Image record storage integration using Dynamo DB
//!
//! Every uploaded image gets one record pointing at its object in the bucket.
//! Records are only ever inserted and scanned.

mod error;

use std::collections::HashMap;
use std::sync::Arc;

use aws_sdk_dynamodb::{error::SdkError, types::AttributeValue, Client as DynamoDbClient};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;
use uuid::Uuid;

pub use error::{ImageRecordStorageError, ImageRecordStorageResult};

/// Attribute names for image records table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ImageRecordAttribute {
    /// Record id (Primary Key), generated on insert
    Id,
    /// Filename as supplied by the client
    Filename,
    /// Object key in the bucket
    StorageKey,
    /// Public URL of the object
    Url,
}

/// Image record as stored in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Record id (Primary Key)
    pub id: String,
    /// Filename as supplied by the client
    pub filename: String,
    /// Object key in the bucket
    pub storage_key: String,
    /// Public URL of the object
    pub url: String,
}

/// Image record before an id has been assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImageRecord {
    /// Filename as supplied by the client
    pub filename: String,
    /// Object key in the bucket
    pub storage_key: String,
    /// Public URL of the object
    pub url: String,
}

impl NewImageRecord {
    /// Attaches an id, producing the record that gets stored
    #[must_use]
    pub fn with_id(self, id: String) -> ImageRecord {
        ImageRecord {
            id,
            filename: self.filename,
            storage_key: self.storage_key,
            url: self.url,
        }
    }
}

/// Image record storage client for Dynamo DB operations
pub struct ImageRecordStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl ImageRecordStorage {
    /// Creates a new image record storage client
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured Dynamo DB client
    /// * `table_name` - Dynamo DB table name for image records
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Inserts a new image record under a freshly generated id
    ///
    /// # Arguments
    ///
    /// * `record` - The record to insert
    ///
    /// # Returns
    ///
    /// The stored record, including its generated id
    ///
    /// # Errors
    ///
    /// Returns `ImageRecordStorageError::ImageRecordExists` if the generated id collides,
    /// or other `ImageRecordStorageError` if the Dynamo DB operation fails
    pub async fn insert(&self, record: &NewImageRecord) -> ImageRecordStorageResult<ImageRecord> {
        let record = record.clone().with_id(Uuid::new_v4().to_string());

        let item = serde_dynamo::to_item(&record)
            .map_err(|e| ImageRecordStorageError::SerializationError(e.to_string()))?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", ImageRecordAttribute::Id.to_string())
            .send()
            .await
            .map_err(|err| {
                if matches!(
                    err,
                    SdkError::ServiceError(ref svc) if svc.err().is_conditional_check_failed_exception()
                ) {
                    ImageRecordStorageError::ImageRecordExists(record.id.clone())
                } else {
                    err.into()
                }
            })?;

        debug!(id = %record.id, storage_key = %record.storage_key, "Inserted image record");

        Ok(record)
    }

    /// Returns every image record in the table
    ///
    /// Follows `LastEvaluatedKey` until the scan is exhausted. Order is whatever
    /// Dynamo DB returns.
    ///
    /// # Errors
    ///
    /// Returns `ImageRecordStorageError` if the Dynamo DB operation fails or an item
    /// cannot be parsed
    pub async fn list_all(&self) -> ImageRecordStorageResult<Vec<ImageRecord>> {
        let mut records = Vec::new();
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let response = self
                .dynamodb_client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await?;

            for item in response.items() {
                let record: ImageRecord = serde_dynamo::from_item(item.clone())
                    .map_err(|e| ImageRecordStorageError::ParseImageRecordError(e.to_string()))?;
                records.push(record);
            }

            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!(count = records.len(), "Scanned image records");

        Ok(records)
    }
}
