//! 对象缓存层
//!
//! 通过注册表按名称选择后端（`moka` 内存缓存或 `redis`），
//! 业务代码只依赖 [`ObjectCache`] trait。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache, ObjectCacheExt};

/// 声明一个缓存插件，生成 `register()` 供启动时调用
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        pub(crate) fn register() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache: $crate::errors::Result<Box<dyn $crate::cache::ObjectCache>> =
                            <$ty>::new().map(|c| Box::new(c) as Box<dyn $crate::cache::ObjectCache>);
                        cache
                    })
                }),
            );
        }
    };
}
