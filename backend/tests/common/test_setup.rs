use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use image_api::{
    metadata::mock::InMemoryMetadataStore,
    object_storage::mock::InMemoryObjectStore,
    server,
    types::Environment,
    uploads::UploadCoordinator,
};
use tower::ServiceExt;

use super::utils::{multipart_body, Part, BOUNDARY, TEST_BUCKET, TEST_REGION};

/// Setup test tracing
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Router wired to in-memory stores
pub struct TestSetup {
    pub router: Router,
    pub object_store: Arc<InMemoryObjectStore>,
    pub metadata_store: Arc<InMemoryMetadataStore>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_stores(InMemoryObjectStore::new(), InMemoryMetadataStore::new())
    }

    pub fn with_stores(
        object_store: InMemoryObjectStore,
        metadata_store: InMemoryMetadataStore,
    ) -> Self {
        setup_test_env();

        let object_store = Arc::new(object_store);
        let metadata_store = Arc::new(metadata_store);

        let coordinator = Arc::new(UploadCoordinator::new(
            object_store.clone(),
            metadata_store.clone(),
            TEST_BUCKET.to_string(),
            TEST_REGION.to_string(),
        ));

        let router = server::router(Environment::Development, coordinator);

        Self {
            router,
            object_store,
            metadata_store,
        }
    }

    /// Upload a single `file` part
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let body = multipart_body(&[Part::file(filename, content_type, data)]);
        self.send_multipart_request("/upload", body).await
    }

    pub async fn send_multipart_request(
        &self,
        route: &str,
        body: Vec<u8>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
