use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::bulk::entities::BulkResult;

/// 批量操作响应，附带一次性提示消息令牌
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkResponse {
    pub result: BulkResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_token: Option<String>,
}

/// 提示消息级别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub enum FlashLevel {
    Success,
    Warning,
    Error,
}

/// 跨页面传递的一次性提示消息，由展示层负责本地化
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub summary: BulkResult,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl FlashLevel {
    pub fn for_result(result: &BulkResult) -> Self {
        if result.failure_count == 0 && result.warnings.is_empty() {
            FlashLevel::Success
        } else if result.success_count == 0 {
            FlashLevel::Error
        } else {
            FlashLevel::Warning
        }
    }
}
