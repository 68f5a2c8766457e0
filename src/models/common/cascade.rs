use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 实体种类
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
pub enum EntityKind {
    Teacher,
    Class,
    Student,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Teacher => write!(f, "teacher"),
            EntityKind::Class => write!(f, "class"),
            EntityKind::Student => write!(f, "student"),
        }
    }
}

/// 删除实体时级联处理的结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
pub struct CascadeReport {
    pub entity: EntityKind,
    pub id: i64,
    // 被清空 teacher_id 的班级数量（删除教师或班级时）
    pub classes_cleared: u64,
    // 被删除的成员关系数量（删除班级或学生时）
    pub memberships_removed: u64,
}
