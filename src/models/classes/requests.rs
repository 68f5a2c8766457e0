use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{validate_id, validate_name, validate_optional_text};
use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub teacher_id: Option<i64>,
    pub unassigned: Option<bool>,
    pub search: Option<String>,
}

impl From<ClassQueryParams> for ClassListQuery {
    fn from(params: ClassQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            teacher_id: params.teacher_id,
            unassigned: params.unassigned,
            search: params.search,
        }
    }
}

// 创建班级请求
//
// teacher_id 可选：创建时不指定教师，之后通过分配接口设置
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
}

impl CreateClassRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name("name", &self.name)?;
        validate_optional_text("description", self.description.as_deref())?;
        if let Some(teacher_id) = self.teacher_id {
            validate_id("teacher_id", teacher_id)?;
        }
        Ok(())
    }
}

// 更新班级请求（教师分配走专门的分配接口）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateClassRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        validate_optional_text("description", self.description.as_deref())
    }
}

// 为班级分配教师请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct AssignTeacherRequest {
    pub teacher_id: i64,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub unassigned: Option<bool>,
    pub search: Option<String>,
}
