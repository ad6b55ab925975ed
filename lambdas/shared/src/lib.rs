//! Todo Core Library
//!
//! Shared functionality for the todo Lambda functions including:
//! - Domain models and configuration
//! - Store contract with DynamoDB and in-memory implementations
//! - Repository and update merging
//! - Attachment upload URLs
//! - Caller identity, request validation and HTTP responses
//! - Error types

pub mod auth;
pub mod config;
pub mod dynamo;
pub mod errors;
pub mod http;
pub mod merge;
pub mod models;
pub mod repository;
pub mod service;
pub mod signer;
pub mod store;
pub mod validation;

pub use config::Config;
pub use dynamo::DynamoStore;
pub use errors::{Error, Result};
pub use merge::MergePolicy;
pub use models::*;
pub use repository::TodoRepository;
pub use service::{AwsTodoService, TodoService};
pub use signer::{S3UploadSigner, UploadUrlSigner};
pub use store::TodoStore;

#[cfg(any(test, feature = "test-util"))]
pub use signer::RecordingSigner;
#[cfg(any(test, feature = "test-util"))]
pub use store::MemoryStore;
