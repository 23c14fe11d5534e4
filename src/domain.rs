use crate::errors::{ImageError, StoreError, SynthesisError};
use crate::models::{StoredResult, SynthesizedResult};
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

/// Trait defining the TTL-bounded result store.
///
/// Fields and image are written together and expire together; expiration is
/// enforced by the backend, never by callers checking timestamps.
#[async_trait]
pub trait ResultStore: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    /// Writes the fields blob and, when present, the image blob under keys
    /// derived from `id`, both with expiration `ttl`.
    async fn put(
        &self,
        id: Uuid,
        fields: &StoredResult,
        image: Option<&[u8]>,
        ttl: Duration,
    ) -> Result<(), StoreError>;

    /// Retrieves the fields blob by id.
    /// Returns Ok(None) if the record is missing or expired.
    async fn get_fields(&self, id: Uuid) -> Result<Option<StoredResult>, StoreError>;

    /// Retrieves the image bytes by id.
    /// Returns Ok(None) if missing, expired, or never stored.
    async fn get_image(&self, id: Uuid) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Trait defining the result synthesizer collaborator: formatted answer
/// lines in, structured result out. No retries; any failure aborts the
/// submission.
#[async_trait]
pub trait ResultSynthesizer: Send + Sync + 'static {
    async fn synthesize(&self, answers: &[String]) -> Result<SynthesizedResult, SynthesisError>;
}

/// Trait defining the image provider collaborator: animal name in, PNG
/// bytes out. Failures are non-fatal to the submission.
#[async_trait]
pub trait ImageProvider: Send + Sync + 'static {
    async fn generate(&self, animal: &str) -> Result<Vec<u8>, ImageError>;
}
