//! Upload URLs for todo attachments

#[cfg(any(test, feature = "test-util"))]
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::errors::{Error, Result};

/// Public URL an attachment is served from once uploaded
pub fn attachment_url(bucket: &str, todo_id: &str) -> String {
    format!("https://{}.s3.amazonaws.com/{}", bucket, todo_id)
}

/// Issues time-limited, write-only URLs for a blob key
#[async_trait]
pub trait UploadUrlSigner: Send + Sync {
    async fn sign_upload_url(&self, bucket: &str, key: &str, ttl_secs: u64) -> Result<String>;
}

/// Presigns S3 `PutObject` requests
pub struct S3UploadSigner {
    client: Client,
}

impl S3UploadSigner {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl UploadUrlSigner for S3UploadSigner {
    async fn sign_upload_url(&self, bucket: &str, key: &str, ttl_secs: u64) -> Result<String> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(ttl_secs))
            .map_err(|e| Error::Storage(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}

#[cfg(any(test, feature = "test-util"))]
/// One signing request seen by [`RecordingSigner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    pub bucket: String,
    pub key: String,
    pub ttl_secs: u64,
}

#[cfg(any(test, feature = "test-util"))]
/// Signer that records requests and returns a fake signature, for tests
#[derive(Debug, Default)]
pub struct RecordingSigner {
    requests: Mutex<Vec<SignRequest>>,
    failing: bool,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signer whose every call fails with a storage error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<SignRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl UploadUrlSigner for RecordingSigner {
    async fn sign_upload_url(&self, bucket: &str, key: &str, ttl_secs: u64) -> Result<String> {
        if self.failing {
            return Err(Error::Storage("signing failed".to_string()));
        }
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SignRequest {
                bucket: bucket.to_string(),
                key: key.to_string(),
                ttl_secs,
            });
        Ok(format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=test",
            bucket, key, ttl_secs
        ))
    }
}
