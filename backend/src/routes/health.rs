use aide::axum::IntoApiResponse;
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

/// Liveness of the image upload service
#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    status: &'static str,
    /// Name of the running service
    service: &'static str,
    /// Crate version
    semver: &'static str,
    /// Commit hash of the build, when `GIT_REV` was set at compile time
    rev: Option<&'static str>,
}

/// Reports that the service is up
///
/// Does not touch the bucket or the metadata table.
pub async fn handler() -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
    })
}
