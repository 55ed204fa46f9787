use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisBackend);

/// Redis 缓存后端，键统一带 key_prefix 前缀
pub struct RedisBackend {
    client: redis::Client,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisBackend {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| format!("Redis URL 无效: {e}"))?;

        // 启动时 PING 一次，连不上立即失败交给上层回退
        let mut conn = client
            .get_connection()
            .map_err(|e| format!("Redis 连接失败: {e}"))?;
        redis::cmd("PING")
            .query::<String>(&mut conn)
            .map_err(|e| format!("Redis PING 失败: {e}"))?;

        debug!(
            "Redis 缓存就绪，前缀 '{}'，默认 TTL {}s",
            redis_config.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            default_ttl: config.cache.default_ttl,
        })
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    async fn connection(&self) -> Option<MultiplexedConnection> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("获取 Redis 连接失败: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ObjectCache for RedisBackend {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let Some(mut conn) = self.connection().await else {
            return CacheResult::ExistsButNoValue;
        };

        match conn.get::<_, Option<String>>(self.prefixed(key)).await {
            Ok(Some(value)) => CacheResult::Found(value),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("读取缓存键 '{}' 失败: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        // ttl 为 0 时使用配置的默认 TTL
        let effective_ttl = if ttl == 0 { self.default_ttl } else { ttl };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.prefixed(&key), value, effective_ttl)
            .await
        {
            error!("写入缓存键 '{}' 失败: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        if let Err(e) = conn.del::<_, i64>(self.prefixed(key)).await {
            error!("删除缓存键 '{}' 失败: {}", key, e);
        }
    }
}
