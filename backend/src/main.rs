use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use backend_storage::image_record::ImageRecordStorage;
use image_api::{
    object_storage::S3ObjectStorage, server, types::Environment, uploads::UploadCoordinator,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local development reads settings from a .env file when present
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    // Use JSON format for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let bucket_name = environment.s3_bucket();
    let region = environment.aws_region();

    let aws_config = environment.aws_config().await;

    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(&aws_config),
    ));
    let object_storage = Arc::new(S3ObjectStorage::new(s3_client, bucket_name.clone()));

    let dynamodb_client = Arc::new(DynamoDbClient::new(&aws_config));
    let image_record_storage = Arc::new(ImageRecordStorage::new(
        dynamodb_client,
        environment.images_table_name(),
    ));

    let coordinator = Arc::new(UploadCoordinator::new(
        object_storage,
        image_record_storage,
        bucket_name,
        region,
    ));

    server::start(environment, coordinator).await
}
