mod docs;
/// Health check route
pub mod health;
/// Image upload and listing routes
pub mod images;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

pub use docs::openapi;

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route("/upload", post(images::upload_image))
        .api_route("/images", get(images::list_images))
}
