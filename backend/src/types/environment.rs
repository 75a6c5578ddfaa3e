//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};

const DEFAULT_DEV_BUCKET: &str = "image-uploads";
const DEFAULT_DEV_REGION: &str = "us-east-1";
const DEFAULT_IMAGES_TABLE: &str = "images";
const DEFAULT_PORT: u16 = 8000;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the S3 bucket name for the environment
    ///
    /// # Panics
    ///
    /// Panics if the `AWS_S3_BUCKET` environment variable is not set outside development
    #[must_use]
    pub fn s3_bucket(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("AWS_S3_BUCKET").expect("AWS_S3_BUCKET environment variable is not set")
            }
            Self::Development => {
                env::var("AWS_S3_BUCKET").unwrap_or_else(|_| DEFAULT_DEV_BUCKET.to_string())
            }
        }
    }

    /// Returns the AWS region, used both by the SDK clients and for object URLs
    ///
    /// # Panics
    ///
    /// Panics if the `AWS_REGION` environment variable is not set outside development
    #[must_use]
    pub fn aws_region(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("AWS_REGION").expect("AWS_REGION environment variable is not set")
            }
            Self::Development => {
                env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_DEV_REGION.to_string())
            }
        }
    }

    /// Returns the Dynamo DB table holding image records
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn images_table_name(&self) -> String {
        env::var("IMAGES_TABLE_NAME").unwrap_or_else(|_| DEFAULT_IMAGES_TABLE.to_string())
    }

    /// Port the HTTP server listens on
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number
    #[allow(clippy::unused_self)]
    pub fn port(&self) -> Result<u16, std::num::ParseIntError> {
        env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.parse())
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .region(Region::new(self.aws_region()))
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration derived from the shared SDK configuration
    #[must_use]
    pub fn s3_client_config(&self, aws_config: &aws_config::SdkConfig) -> aws_sdk_s3::Config {
        let mut builder = aws_sdk_s3::config::Builder::from(aws_config);

        // LocalStack only serves path-style requests
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}
