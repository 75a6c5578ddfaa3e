use crate::types::Environment;
use aide::{
    axum::ApiRouter,
    openapi::{Info, OpenApi},
    scalar::Scalar,
};
use axum::http::StatusCode;
use axum::{response::IntoResponse, routing::get, Extension, Json};

const API_TITLE: &str = "Image Upload API";

/// Empty document carrying the service description, filled in by `finish_api`
pub fn openapi() -> OpenApi {
    OpenApi {
        info: Info {
            title: API_TITLE.to_string(),
            description: Some(
                "Upload images to object storage and list the recorded uploads".to_string(),
            ),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Info::default()
        },
        ..OpenApi::default()
    }
}

/// Scalar UI at `/docs` and the raw document at `/openapi.json`
pub fn handler() -> ApiRouter {
    let scalar = Scalar::new("/openapi.json").with_title(API_TITLE);

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", get(openapi_schema))
}

#[allow(clippy::unused_async)]
async fn openapi_schema(
    Extension(environment): Extension<Environment>,
    Extension(openapi): Extension<OpenApi>,
) -> impl IntoResponse {
    if !environment.show_api_docs() {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(openapi).into_response()
}
