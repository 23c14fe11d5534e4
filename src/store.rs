use crate::{domain::ResultStore, errors::StoreError, models::StoredResult};
use anyhow::Context;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{self, info};
use uuid::Uuid;

/// Redis-backed result store.
///
/// Two blobs per id (`result:{id}:json`, `result:{id}:image`) written in one
/// MULTI/EXEC transaction with the same TTL, so they expire together. Redis
/// evicts expired keys itself; reads of expired or never-written ids come
/// back as nil and surface as `Ok(None)`.
#[derive(Clone)]
pub struct RedisResultStore {
    conn: ConnectionManager,
}

impl RedisResultStore {
    /// Connects to Redis and returns a store instance.
    ///
    /// The `ConnectionManager` reconnects on its own and is cloned per
    /// operation, so the store is safe for concurrent use without locking.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)
            .context("Failed to create Redis client")
            .map_err(StoreError::Unavailable)?;

        let conn = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")
            .map_err(StoreError::Unavailable)?;

        info!(%redis_url, "Connected to Redis result store");

        Ok(Self { conn })
    }

    fn fields_key(id: Uuid) -> String {
        format!("result:{}:json", id)
    }

    fn image_key(id: Uuid) -> String {
        format!("result:{}:image", id)
    }
}

#[async_trait]
impl ResultStore for RedisResultStore {
    async fn put(
        &self,
        id: Uuid,
        fields: &StoredResult,
        image: Option<&[u8]>,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(fields)
            .context("Failed to serialize result fields")
            .map_err(StoreError::Unavailable)?;

        let ttl_secs = ttl.as_secs();
        tracing::debug!(result_id = %id, ttl_secs, has_image = image.is_some(), "Redis: writing result");

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.cmd("SET")
            .arg(Self::fields_key(id))
            .arg(json)
            .arg("EX")
            .arg(ttl_secs);
        if let Some(bytes) = image {
            pipe.cmd("SET")
                .arg(Self::image_key(id))
                .arg(bytes)
                .arg("EX")
                .arg(ttl_secs);
        }

        let mut conn = self.conn.clone();
        let _: () = pipe
            .query_async(&mut conn)
            .await
            .context(format!("Redis: failed to write result (id: {})", id))
            .map_err(StoreError::Unavailable)?;

        tracing::debug!(result_id = %id, "Redis: result written");
        Ok(())
    }

    async fn get_fields(&self, id: Uuid) -> Result<Option<StoredResult>, StoreError> {
        let mut conn = self.conn.clone();
        let json: Option<String> = conn
            .get(Self::fields_key(id))
            .await
            .context(format!("Redis: failed to get result fields (id: {})", id))
            .map_err(StoreError::Unavailable)?;

        match json {
            Some(data) => {
                let fields: StoredResult = serde_json::from_str(&data).map_err(|e| {
                    tracing::error!(result_id = %id, "Redis: retrieved fields blob but failed to parse it");
                    StoreError::DataCorruption(format!(
                        "Failed to parse fields blob for id {}: {}",
                        id, e
                    ))
                })?;
                Ok(Some(fields))
            }
            None => Ok(None), // Missing or expired is not an error
        }
    }

    async fn get_image(&self, id: Uuid) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        let bytes: Option<Vec<u8>> = conn
            .get(Self::image_key(id))
            .await
            .context(format!("Redis: failed to get result image (id: {})", id))
            .map_err(StoreError::Unavailable)?;

        Ok(bytes)
    }
}
