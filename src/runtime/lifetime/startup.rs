use crate::cache::{ObjectCache, register::registered_backend_names};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 准备服务器启动的上下文：存储连接（含迁移）与对象缓存
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        debug!("已注册的缓存后端: {:?}", registered_backend_names());
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    info!("存储后端初始化完成，迁移已执行");

    let cache = crate::cache::create_object_cache()
        .await
        .expect("Failed to create cache backend");

    StartupContext { storage, cache }
}
