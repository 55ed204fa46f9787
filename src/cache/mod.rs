pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};

/// 声明并注册一个对象缓存后端
///
/// 进程启动时经 ctor 注册到后端表，运行时按 cache.type 查找并构造。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        ::paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_cache_backend(
                    $name,
                    ::std::sync::Arc::new(|| {
                        ::std::boxed::Box::pin(async {
                            $plugin::new()
                                .map(|cache| {
                                    ::std::boxed::Box::new(cache)
                                        as ::std::boxed::Box<dyn $crate::cache::ObjectCache>
                                })
                                .map_err($crate::errors::CourseHubError::cache_connection)
                        })
                    }),
                );
            }
        }
    };
}

/// 按配置构造对象缓存实例
///
/// 先尝试 cache.type 指定的后端，失败时回退到进程内 moka，
/// 两者都不可用才报错。
pub async fn create_object_cache() -> Result<Arc<dyn ObjectCache>> {
    let configured = AppConfig::get().cache.cache_type.as_str();

    let mut candidates = vec![configured];
    if configured != "moka" {
        candidates.push("moka");
    }

    for name in candidates {
        let Some(constructor) = register::lookup_cache_backend(name) else {
            warn!("缓存后端 {} 未注册，跳过", name);
            continue;
        };
        match constructor().await {
            Ok(cache) => {
                info!("缓存后端 {} 初始化完成", name);
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("缓存后端 {} 初始化失败: {}", name, e),
        }
    }

    Err(CourseHubError::cache_plugin_not_found(format!(
        "没有可用的缓存后端（配置为 {configured}）"
    )))
}
