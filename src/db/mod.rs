pub mod gateway;
pub mod redis;
pub mod storage;

pub use gateway::CacheKey;
pub use gateway::Gateway;
pub use redis::create_redis_client;
pub use redis::RedisStorage;
pub use storage::MemoryStorage;
pub use storage::Storage;
