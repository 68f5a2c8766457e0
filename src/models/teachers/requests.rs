use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{validate_name, validate_optional_text, validate_phone};
use serde::Deserialize;
use ts_rs::TS;

// 教师查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

impl From<TeacherQueryParams> for TeacherListQuery {
    fn from(params: TeacherQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
        }
    }
}

// 创建教师请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub display_name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
}

impl CreateTeacherRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name("display_name", &self.display_name)?;
        validate_optional_text("specialty", self.specialty.as_deref())?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}

// 更新教师请求（仅更新提供的字段）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub display_name: Option<String>,
    pub specialty: Option<String>,
    pub phone: Option<String>,
}

impl UpdateTeacherRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.display_name {
            validate_name("display_name", name)?;
        }
        validate_optional_text("specialty", self.specialty.as_deref())?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}

// 教师列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
