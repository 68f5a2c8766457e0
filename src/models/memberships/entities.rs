use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 分配学生到班级的结果；`changed == false` 表示关系已存在（幂等空操作）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/membership.ts")]
pub struct AssignStudentOutcome {
    pub student_id: i64,
    pub class_id: i64,
    pub changed: bool,
}

/// 移除成员关系的状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/membership.ts")]
pub enum RemovalStatus {
    Removed,
    NotMember,
}

/// 移除学生的结果
///
/// 成员关系删除后才会调用外部钩子；钩子失败记录在 `hook_error` 中，不回滚删除。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/membership.ts")]
pub struct RemoveStudentOutcome {
    pub student_id: i64,
    pub class_id: i64,
    pub status: RemovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_error: Option<String>,
}
