use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::RosterError;
use crate::models::ErrorCode;

// 统一的API响应结构
//
// 成功：`{ ok: true, code, message, data, timestamp }`
// 失败：`{ ok: false, code, error_kind, message, timestamp }`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub ok: bool,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            code: ErrorCode::Success as i32,
            error_kind: None,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    /// 覆盖响应码（例如批量操作部分失败仍返回数据）
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code as i32;
        self
    }
}

impl ApiResponse<()> {
    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            code: code as i32,
            error_kind: None,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 从业务错误构建失败响应
    pub fn from_error(err: &RosterError) -> Self {
        Self {
            ok: false,
            code: ErrorCode::from(err) as i32,
            error_kind: Some(err.error_kind().to_string()),
            message: err.message().to_string(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}
