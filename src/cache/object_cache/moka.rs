use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};

#[derive(Clone)]
struct CachedValue {
    value: String,
    ttl: Duration,
    expires_at: Instant,
}

// 按条目自身的 TTL 过期
struct PerEntryExpiry;

impl Expiry<String, CachedValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, CachedValue>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub fn new(max_capacity: u64, default_ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            max_capacity
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        let cached = CachedValue {
            value,
            ttl,
            expires_at: Instant::now() + ttl,
        };
        self.inner.insert(key, cached).await;
    }

    async fn take_raw(&self, key: &str) -> CacheResult<String> {
        // 已过期但尚未被清理的条目同样视为不存在
        match self.inner.remove(key).await {
            Some(cached) if cached.expires_at > Instant::now() => CacheResult::Found(cached.value),
            Some(_) => {
                debug!("Key expired before take: {}", key);
                CacheResult::NotFound
            }
            None => CacheResult::NotFound,
        }
    }
}
