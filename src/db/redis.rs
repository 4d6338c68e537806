use redis::AsyncCommands;
use redis::Client;

use crate::db::storage::Storage;
use crate::error::AppResult;

/// Creates a Redis client for the durable key-value backing
///
/// Uses connection pooling via the connection-manager feature.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed [`Storage`] implementation
///
/// Values are written with plain `SET`: entries carry no TTL and are never
/// proactively expired.
#[derive(Clone)]
pub struct RedisStorage {
    client: Client,
}

impl RedisStorage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Storage for RedisStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
