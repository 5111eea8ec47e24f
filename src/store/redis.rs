use async_trait::async_trait;
use ::redis::AsyncCommands;

use super::{validate_key, KeyValueStore, StoreError};
use crate::redis_client::RedisClient;

/// Простые GET/SET/DEL без TTL: история должна жить, пока её не очистят.
#[derive(Clone)]
pub struct RedisStore {
    redis: RedisClient,
}

impl RedisStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let mut conn = self.redis.conn.clone();
        let data: Option<String> = conn.get(key).await?;
        Ok(data)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut conn = self.redis.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut conn = self.redis.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
