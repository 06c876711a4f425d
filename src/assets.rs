//! Asset manager: uploads listing images through an object-storage gateway,
//! enforcing the size and MIME-type policy before any byte leaves the process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use mime::Mime;

/// Hard ceiling per uploaded file (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5_242_880;

/// Contract over the external object-storage service: accepts a blob, returns
/// a durable public URL with no expiry managed here.
pub trait ObjectStore: Send + Sync {
    fn put(&self, key: &str, bytes: &[u8], content_type: &Mime) -> Result<String, ObjectStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("object storage unavailable: {0}")]
    Unavailable(String),
}

/// One file as handed over by the presentation layer.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

/// Why a file was refused. Refusal is per-file and non-fatal for a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("file exceeds {limit} bytes (got {size})")]
    TooLarge { size: usize, limit: usize },
    #[error("content type '{0}' is not allowed")]
    UnsupportedType(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("upload refused for '{file_name}': {reason}")]
    Rejected {
        file_name: String,
        reason: RejectReason,
    },
    #[error(transparent)]
    Store(#[from] ObjectStoreError),
}

/// Size and MIME allow-list applied to every upload.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_size_bytes: usize,
    allowed: Vec<Mime>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: MAX_UPLOAD_BYTES,
            allowed: vec![mime::IMAGE_PNG, mime::IMAGE_JPEG],
        }
    }
}

impl UploadPolicy {
    pub fn check(&self, upload: &UploadRequest) -> Result<(), RejectReason> {
        if upload.bytes.len() > self.max_size_bytes {
            return Err(RejectReason::TooLarge {
                size: upload.bytes.len(),
                limit: self.max_size_bytes,
            });
        }
        if !self.allowed.contains(&upload.content_type) {
            return Err(RejectReason::UnsupportedType(
                upload.content_type.to_string(),
            ));
        }
        Ok(())
    }
}

/// A file refused by policy, reported by name so the caller can tell the
/// operator which upload failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedUpload {
    pub file_name: String,
    pub reason: RejectReason,
}

/// Outcome of a batch upload: URLs in submission order, refusals alongside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchUpload {
    pub urls: Vec<String>,
    pub rejected: Vec<RejectedUpload>,
}

/// Uploads listing images under the `properties/` namespace.
pub struct AssetManager<O> {
    store: Arc<O>,
    policy: UploadPolicy,
    key_seq: AtomicU64,
}

impl<O: ObjectStore> AssetManager<O> {
    pub fn new(store: Arc<O>) -> Self {
        Self::with_policy(store, UploadPolicy::default())
    }

    pub fn with_policy(store: Arc<O>, policy: UploadPolicy) -> Self {
        Self {
            store,
            policy,
            key_seq: AtomicU64::new(1),
        }
    }

    fn next_key(&self, content_type: &Mime) -> String {
        let id = self.key_seq.fetch_add(1, Ordering::Relaxed);
        format!("properties/{id:08x}.{}", content_type.subtype())
    }

    /// Upload a single file; policy violations are errors here.
    pub fn upload(&self, request: UploadRequest) -> Result<String, AssetError> {
        if let Err(reason) = self.policy.check(&request) {
            return Err(AssetError::Rejected {
                file_name: request.file_name,
                reason,
            });
        }

        let key = self.next_key(&request.content_type);
        Ok(self.store.put(&key, &request.bytes, &request.content_type)?)
    }

    /// Upload a batch, refusing files that violate policy and continuing with
    /// the rest. A storage failure aborts the batch; refusals never do.
    pub fn upload_batch(&self, requests: Vec<UploadRequest>) -> Result<BatchUpload, AssetError> {
        let mut outcome = BatchUpload::default();

        for request in requests {
            if let Err(reason) = self.policy.check(&request) {
                tracing::warn!(file = %request.file_name, %reason, "upload refused");
                outcome.rejected.push(RejectedUpload {
                    file_name: request.file_name,
                    reason,
                });
                continue;
            }

            let key = self.next_key(&request.content_type);
            let url = self
                .store
                .put(&key, &request.bytes, &request.content_type)?;
            outcome.urls.push(url);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct MemoryObjects {
        keys: Mutex<Vec<String>>,
    }

    impl ObjectStore for MemoryObjects {
        fn put(
            &self,
            key: &str,
            _bytes: &[u8],
            _content_type: &Mime,
        ) -> Result<String, ObjectStoreError> {
            self.keys.lock().expect("lock").push(key.to_string());
            Ok(format!("https://cdn.example/{key}"))
        }
    }

    fn png(name: &str, size: usize) -> UploadRequest {
        UploadRequest {
            file_name: name.to_string(),
            content_type: mime::IMAGE_PNG,
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn batch_skips_oversized_files_and_continues() {
        let store = Arc::new(MemoryObjects::default());
        let manager = AssetManager::new(store.clone());

        let outcome = manager
            .upload_batch(vec![
                png("cover.png", 1024),
                png("huge.png", MAX_UPLOAD_BYTES + 1),
                png("kitchen.png", 2048),
            ])
            .expect("batch completes");

        assert_eq!(outcome.urls.len(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].file_name, "huge.png");
        assert!(matches!(
            outcome.rejected[0].reason,
            RejectReason::TooLarge { .. }
        ));
        assert_eq!(store.keys.lock().expect("lock").len(), 2);
    }

    #[test]
    fn refuses_disallowed_content_types() {
        let manager = AssetManager::new(Arc::new(MemoryObjects::default()));
        let request = UploadRequest {
            file_name: "tour.gif".to_string(),
            content_type: "image/gif".parse().expect("valid mime"),
            bytes: vec![0u8; 16],
        };

        match manager.upload(request) {
            Err(AssetError::Rejected { file_name, reason }) => {
                assert_eq!(file_name, "tour.gif");
                assert_eq!(
                    reason,
                    RejectReason::UnsupportedType("image/gif".to_string())
                );
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn accepted_uploads_return_durable_urls() {
        let manager = AssetManager::new(Arc::new(MemoryObjects::default()));
        let url = manager.upload(png("cover.png", 512)).expect("upload ok");
        assert!(url.starts_with("https://cdn.example/properties/"));
        assert!(url.ends_with(".png"));
    }

    #[test]
    fn exact_limit_is_accepted() {
        let manager = AssetManager::new(Arc::new(MemoryObjects::default()));
        assert!(manager.upload(png("edge.png", MAX_UPLOAD_BYTES)).is_ok());
    }
}
