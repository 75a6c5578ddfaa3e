//! Custom extractors for request validation

use aide::operation::OperationInput;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};

use crate::types::error::AppError;

/// Name of the multipart field carrying the file
pub const FILE_FIELD: &str = "file";

/// File part extracted from a `multipart/form-data` body
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Filename declared by the client
    pub filename: String,
    /// Content type declared by the client, if any
    pub content_type: Option<String>,
    /// File contents
    pub data: Bytes,
}

fn multipart_error(err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            "Uploaded file is too large",
            false,
        );
    }

    tracing::warn!("Failed to read multipart body: {}", err.body_text());
    AppError::new(
        StatusCode::BAD_REQUEST,
        "invalid_multipart",
        "Malformed multipart body",
        false,
    )
}

impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|err| {
            tracing::warn!("Multipart rejection: {err}");
            AppError::new(
                StatusCode::BAD_REQUEST,
                "invalid_content_type",
                "Expected a multipart/form-data body",
                false,
            )
        })?;

        // Only the first `file` field is used, other fields are skipped
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| multipart_error(&err))?
        {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let filename = field.file_name().map(ToString::to_string).ok_or_else(|| {
                AppError::new(
                    StatusCode::BAD_REQUEST,
                    "missing_filename",
                    "File field must include a filename",
                    false,
                )
            })?;
            let content_type = field.content_type().map(ToString::to_string);
            let data = field.bytes().await.map_err(|err| multipart_error(&err))?;

            return Ok(Self {
                filename,
                content_type,
                data,
            });
        }

        Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "missing_file",
            "Multipart body has no `file` field",
            false,
        ))
    }
}

impl OperationInput for ImageUpload {
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        // Same wire format as a plain multipart body
        Multipart::operation_input(ctx, operation);
    }
}
