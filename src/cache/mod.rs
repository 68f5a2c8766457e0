//! 对象缓存
//!
//! 以字符串为值的键值缓存，支持逐条 TTL；提示消息等短期数据存放于此。

pub mod object_cache;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{Result, RosterError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    /// 写入并指定存活秒数，0 表示使用默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    /// 取出并删除，同一键只有一个调用者能拿到值
    async fn take_raw(&self, key: &str) -> CacheResult<String>;
}

/// 类型化的读写辅助
pub async fn insert_json<T: Serialize + Sync>(
    cache: &dyn ObjectCache,
    key: String,
    value: &T,
    ttl: u64,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    cache.insert_raw(key, json, ttl).await;
    Ok(())
}

pub async fn take_json<T: DeserializeOwned>(
    cache: &dyn ObjectCache,
    key: &str,
) -> Result<Option<T>> {
    match cache.take_raw(key).await {
        CacheResult::Found(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| RosterError::serialization(format!("缓存数据反序列化失败: {e}"))),
        CacheResult::NotFound => Ok(None),
    }
}

pub fn create_cache(config: &AppConfig) -> Arc<dyn ObjectCache> {
    Arc::new(object_cache::moka::MokaCacheWrapper::new(
        config.cache.max_capacity,
        config.cache.default_ttl,
    ))
}
