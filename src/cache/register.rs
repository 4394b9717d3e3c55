use crate::cache::traits::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, Once, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static BUILTIN_PLUGINS: Once = Once::new();

/// 注册内置缓存后端，重复调用无副作用
pub fn register_builtin_plugins() {
    BUILTIN_PLUGINS.call_once(|| {
        super::object_cache::moka::register();
        super::object_cache::redis::register();
    });
}

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let name = name.into();
    match OBJECT_CACHE_REGISTRY.write() {
        Ok(mut registry) => {
            registry.insert(name, constructor);
        }
        Err(poisoned) => {
            poisoned.into_inner().insert(name, constructor);
        }
    }
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    let registry = match OBJECT_CACHE_REGISTRY.read() {
        Ok(registry) => registry,
        Err(poisoned) => poisoned.into_inner(),
    };
    registry.get(name).cloned()
}

pub fn registered_object_cache_plugins() -> Vec<String> {
    let registry = match OBJECT_CACHE_REGISTRY.read() {
        Ok(registry) => registry,
        Err(poisoned) => poisoned.into_inner(),
    };
    let mut names: Vec<String> = registry.keys().cloned().collect();
    names.sort();
    names
}

pub fn debug_object_cache_registry() {
    let names = registered_object_cache_plugins();
    if names.is_empty() {
        tracing::debug!("No object cache plugins registered.");
    } else {
        tracing::debug!("Registered object cache plugins: {}", names.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plugins_registered() {
        register_builtin_plugins();
        register_builtin_plugins();
        let names = registered_object_cache_plugins();
        assert!(names.contains(&"moka".to_string()));
        assert!(names.contains(&"redis".to_string()));
        assert!(get_object_cache_plugin("memcached").is_none());
    }
}
