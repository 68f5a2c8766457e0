use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 操作者角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub enum ActorRole {
    Admin,  // 管理员：拥有全部能力
    Staff,  // 教务：可分配/移除，不可删除
    Viewer, // 只读
}

impl ActorRole {
    pub const ADMIN: &'static str = "admin";
    pub const STAFF: &'static str = "staff";
    pub const VIEWER: &'static str = "viewer";
}

impl<'de> Deserialize<'de> for ActorRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ActorRole>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Admin => write!(f, "{}", ActorRole::ADMIN),
            ActorRole::Staff => write!(f, "{}", ActorRole::STAFF),
            ActorRole::Viewer => write!(f, "{}", ActorRole::VIEWER),
        }
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ActorRole::ADMIN => Ok(ActorRole::Admin),
            ActorRole::STAFF => Ok(ActorRole::Staff),
            ActorRole::VIEWER => Ok(ActorRole::Viewer),
            _ => Err(format!(
                "Invalid actor role: '{s}'. Supported roles: admin, staff, viewer"
            )),
        }
    }
}

/// 发起操作的主体，由认证中间件放入请求扩展
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    pub actor_id: i64,
    pub role: ActorRole,
}

impl ActorContext {
    pub fn new(actor_id: i64, role: ActorRole) -> Self {
        Self { actor_id, role }
    }
}

/// 权限门控检查的能力项，每个引擎入口对应一项
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ManageTeachers,
    ManageClasses,
    ManageStudents,
    AssignTeacher,
    AssignStudents,
    RemoveStudents,
    UpdateStudentStatus,
    DeleteClasses,
    DeleteTeachers,
    DeleteStudents,
    BulkAssignTeacher,
    BulkAssignStudents,
    BulkRemoveStudents,
    BulkDelete,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageTeachers => "manage_teachers",
            Capability::ManageClasses => "manage_classes",
            Capability::ManageStudents => "manage_students",
            Capability::AssignTeacher => "assign_teacher",
            Capability::AssignStudents => "assign_students",
            Capability::RemoveStudents => "remove_students",
            Capability::UpdateStudentStatus => "update_student_status",
            Capability::DeleteClasses => "delete_classes",
            Capability::DeleteTeachers => "delete_teachers",
            Capability::DeleteStudents => "delete_students",
            Capability::BulkAssignTeacher => "bulk_assign_teacher",
            Capability::BulkAssignStudents => "bulk_assign_students",
            Capability::BulkRemoveStudents => "bulk_remove_students",
            Capability::BulkDelete => "bulk_delete",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
