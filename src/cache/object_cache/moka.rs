use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaBackend);

/// 进程内缓存后端，容量与 TTL 由配置决定
pub struct MokaBackend {
    inner: Cache<String, String>,
}

impl MokaBackend {
    pub fn new() -> Result<Self, String> {
        let cache_config = &AppConfig::get().cache;
        let inner = Cache::builder()
            .max_capacity(cache_config.memory.max_capacity)
            .time_to_live(std::time::Duration::from_secs(cache_config.default_ttl))
            .build();

        debug!(
            "Moka 缓存就绪，容量上限 {}，TTL {}s",
            cache_config.memory.max_capacity, cache_config.default_ttl
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectCache for MokaBackend {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => CacheResult::Found(value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
        // moka 的 TTL 在构建时全局设定，不支持按条目覆盖
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}
