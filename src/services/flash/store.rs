use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::cache::{ObjectCache, insert_json, take_json};
use crate::errors::Result;
use crate::models::bulk::{
    entities::BulkResult,
    responses::{FlashLevel, FlashMessage},
};

const FLASH_KEY_PREFIX: &str = "flash:";

/// 一次性提示消息
///
/// 批量结果摘要以随机令牌为键写入对象缓存，带显式过期时间；
/// 令牌只能取出一次。
pub struct FlashStore {
    cache: Arc<dyn ObjectCache>,
    ttl_secs: u64,
}

impl FlashStore {
    pub fn new(cache: Arc<dyn ObjectCache>, ttl_secs: u64) -> Self {
        Self { cache, ttl_secs }
    }

    pub async fn publish(&self, result: &BulkResult) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let message = FlashMessage {
            level: FlashLevel::for_result(result),
            summary: result.clone(),
            expires_at: chrono::Utc::now() + chrono::Duration::seconds(self.ttl_secs as i64),
        };

        insert_json(
            self.cache.as_ref(),
            format!("{FLASH_KEY_PREFIX}{token}"),
            &message,
            self.ttl_secs,
        )
        .await?;

        debug!("Published flash message {} ({:?})", token, message.level);
        Ok(token)
    }

    pub async fn take(&self, token: &str) -> Result<Option<FlashMessage>> {
        if Uuid::parse_str(token).is_err() {
            return Ok(None);
        }
        take_json(self.cache.as_ref(), &format!("{FLASH_KEY_PREFIX}{token}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::bulk::entities::{BulkOperation, ItemOutcome};

    fn store() -> FlashStore {
        FlashStore::new(Arc::new(MokaCacheWrapper::new(100, 60)), 30)
    }

    #[tokio::test]
    async fn test_publish_then_take_once() {
        let store = store();
        let mut result = BulkResult::new(BulkOperation::AssignTeacher, 3);
        result.record(3, ItemOutcome::Success);
        result.record(1, ItemOutcome::NotFound);
        result.record(2, ItemOutcome::Success);

        let token = store.publish(&result).await.unwrap();
        let message = store.take(&token).await.unwrap().unwrap();
        assert_eq!(message.level, FlashLevel::Warning);
        assert_eq!(message.summary, result);
        assert_eq!(message.summary.item_results.target_ids(), vec![3, 1, 2]);

        assert!(store.take(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_token() {
        let store = store();
        assert!(store.take("not-a-token").await.unwrap().is_none());
        let random = Uuid::new_v4().to_string();
        assert!(store.take(&random).await.unwrap().is_none());
    }
}
