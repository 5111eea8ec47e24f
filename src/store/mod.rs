//! Durable key-value storage for the booking ledger.
//!
//! Every backend stores opaque UTF-8 strings under string keys. The booking
//! desk keeps a single JSON blob under [`crate::booking::ledger::LEDGER_KEY`].

pub mod file;
pub mod memory;
pub mod redis;

use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Удаление отсутствующего ключа не считается ошибкой
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn backend_name(&self) -> &'static str;
}

/// Открывает хранилище, выбранное в конфигурации.
pub async fn connect(config: &StorageConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StorageBackend::File => Arc::new(FileStore::new(&config.data_dir)),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Redis => connect_redis(config).await?,
    };
    info!("Storage backend: {}", store.backend_name());
    Ok(store)
}

async fn connect_redis(config: &StorageConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL must be set for the redis backend")?;
    let client = crate::redis_client::RedisClient::new(url)
        .await
        .context("Failed to connect to Redis")?;
    Ok(Arc::new(self::redis::RedisStore::new(client)))
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
