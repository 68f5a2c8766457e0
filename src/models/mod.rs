pub mod actors;
pub mod bulk;
pub mod classes;
pub mod common;
pub mod memberships;
pub mod students;
pub mod teachers;

pub use common::{ApiResponse, CascadeReport, EntityKind, PaginationInfo, PaginationQuery};

use crate::errors::RosterError;

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务响应码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    ValidationFailed = 1001,
    Unauthorized = 1002,
    PermissionDenied = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    StoreError = 1006,
    ExternalHookFailed = 1007,

    // 教师
    TeacherNotFound = 2001,

    // 班级
    ClassNotFound = 3001,

    // 学生
    StudentNotFound = 4001,

    // 批量操作
    BulkPartialFailure = 5001,

    // 提示消息
    FlashNotFound = 6001,
}

impl From<&RosterError> for ErrorCode {
    fn from(err: &RosterError) -> Self {
        match err {
            RosterError::NotFound(_) => ErrorCode::NotFound,
            RosterError::Validation(_) => ErrorCode::ValidationFailed,
            RosterError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            RosterError::Authentication(_) => ErrorCode::Unauthorized,
            RosterError::ExternalHook(_) => ErrorCode::ExternalHookFailed,
            RosterError::Store(_) => ErrorCode::StoreError,
            _ => ErrorCode::InternalServerError,
        }
    }
}
