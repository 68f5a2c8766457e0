use crate::errors::Result;
use crate::models::{common::PaginationQuery, students::entities::StudentStatus};
use crate::utils::validate::validate_name;
use serde::Deserialize;
use ts_rs::TS;

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<StudentStatus>,
    pub class_id: Option<i64>,
    pub search: Option<String>,
}

impl From<StudentQueryParams> for StudentListQuery {
    fn from(params: StudentQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            status: params.status,
            class_id: params.class_id,
            search: params.search,
        }
    }
}

// 创建学生请求，状态缺省为 active
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: String,
    pub status: Option<StudentStatus>,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name("name", &self.name)
    }
}

// 更新学生请求（状态变更走专门接口）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
}

impl UpdateStudentRequest {
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => validate_name("name", name),
            None => Ok(()),
        }
    }
}

// 更新学生状态请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentStatusRequest {
    pub status: StudentStatus,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<StudentStatus>,
    pub class_id: Option<i64>,
    pub search: Option<String>,
}
