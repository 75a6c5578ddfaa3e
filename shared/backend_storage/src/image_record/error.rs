//! Error types for image record storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{put_item::PutItemError, scan::ScanError};
use thiserror::Error;

/// Result type for image record storage operations
pub type ImageRecordStorageResult<T> = Result<T, ImageRecordStorageError>;

/// Errors that can occur during image record storage operations
#[derive(Error, Debug)]
pub enum ImageRecordStorageError {
    /// Failed to insert image record into Dynamo DB
    #[error("Failed to insert image record into DynamoDB: {0}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to scan image records from Dynamo DB
    #[error("Failed to scan image records from DynamoDB: {0}")]
    DynamoDbScanError(#[from] SdkError<ScanError>),

    /// A record with the generated id already exists
    #[error("Image record already exists: {0}")]
    ImageRecordExists(String),

    /// Serialization error for `serde_dynamo`
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Stored item could not be parsed into an image record
    #[error("Failed to parse image record: {0}")]
    ParseImageRecordError(String),
}
