use serde::Deserialize;
use ts_rs::TS;

use crate::models::bulk::entities::BulkOperation;

// 批量为班级分配同一名教师
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkAssignTeacherRequest {
    pub teacher_id: i64,
    pub class_ids: Vec<i64>,
}

// 批量将学生加入同一班级
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkAssignStudentsRequest {
    pub class_id: i64,
    pub student_ids: Vec<i64>,
}

// 批量将学生移出同一班级
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkRemoveStudentsRequest {
    pub class_id: i64,
    pub student_ids: Vec<i64>,
}

// 批量删除
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkDeleteRequest {
    pub ids: Vec<i64>,
}

// 批量删除的目标种类（路径参数）
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BulkDeleteKind {
    Classes,
    Teachers,
    Students,
}

impl BulkDeleteKind {
    pub fn operation(&self) -> BulkOperation {
        match self {
            BulkDeleteKind::Classes => BulkOperation::DeleteClasses,
            BulkDeleteKind::Teachers => BulkOperation::DeleteTeachers,
            BulkDeleteKind::Students => BulkOperation::DeleteStudents,
        }
    }
}
