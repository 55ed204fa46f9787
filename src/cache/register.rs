use crate::cache::traits::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type CacheBackendFuture = Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type CacheBackendConstructor = Arc<dyn Fn() -> CacheBackendFuture + Send + Sync>;

static BACKEND_REGISTRY: Lazy<RwLock<HashMap<String, CacheBackendConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 注册一个缓存后端，同名后注册者覆盖先注册者
pub fn register_cache_backend<S: Into<String>>(name: S, constructor: CacheBackendConstructor) {
    BACKEND_REGISTRY
        .write()
        .expect("Cache registry lock poisoned")
        .insert(name.into(), constructor);
}

pub fn lookup_cache_backend(name: &str) -> Option<CacheBackendConstructor> {
    BACKEND_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .get(name)
        .cloned()
}

/// 当前已注册的后端名称，启动日志用
pub fn registered_backend_names() -> Vec<String> {
    let mut names: Vec<String> = BACKEND_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}
