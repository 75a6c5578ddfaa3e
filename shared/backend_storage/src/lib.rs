//! Backend storage services for the Image Upload API
//!
//! This crate provides the document storage used to persist upload metadata.

pub mod image_record;
