//! Image Upload API service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Image metadata persistence
pub mod metadata;

/// S3 object storage operations
pub mod object_storage;

/// HTTP routes
pub mod routes;

/// Server bootstrap
pub mod server;

/// Shared types: configuration, errors and extractors
pub mod types;

/// Upload and list coordination
pub mod uploads;
