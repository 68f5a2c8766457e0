//! 权限门控
//!
//! 每个引擎入口在访问存储之前调用一次 [`PermissionGate::check_permission`]。

use crate::models::actors::entities::{ActorContext, ActorRole, Capability};

pub trait PermissionGate: Send + Sync {
    fn check_permission(&self, actor: &ActorContext, capability: Capability) -> bool;
}

/// 基于角色的默认门控
///
/// - admin：全部能力
/// - staff：分配/移除教师与学生、更新学生状态，不能删除也不能管理基础信息
/// - viewer：无
#[derive(Debug, Default, Clone, Copy)]
pub struct RolePermissionGate;

impl RolePermissionGate {
    fn staff_allows(capability: Capability) -> bool {
        matches!(
            capability,
            Capability::AssignTeacher
                | Capability::AssignStudents
                | Capability::RemoveStudents
                | Capability::UpdateStudentStatus
                | Capability::BulkAssignTeacher
                | Capability::BulkAssignStudents
                | Capability::BulkRemoveStudents
        )
    }
}

impl PermissionGate for RolePermissionGate {
    fn check_permission(&self, actor: &ActorContext, capability: Capability) -> bool {
        match actor.role {
            ActorRole::Admin => true,
            ActorRole::Staff => Self::staff_allows(capability),
            ActorRole::Viewer => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: ActorRole) -> ActorContext {
        ActorContext::new(1, role)
    }

    #[test]
    fn test_admin_has_every_capability() {
        let gate = RolePermissionGate;
        for capability in [
            Capability::ManageClasses,
            Capability::DeleteTeachers,
            Capability::BulkDelete,
            Capability::AssignTeacher,
        ] {
            assert!(gate.check_permission(&actor(ActorRole::Admin), capability));
        }
    }

    #[test]
    fn test_staff_can_assign_but_not_delete() {
        let gate = RolePermissionGate;
        let staff = actor(ActorRole::Staff);
        assert!(gate.check_permission(&staff, Capability::AssignStudents));
        assert!(gate.check_permission(&staff, Capability::BulkRemoveStudents));
        assert!(gate.check_permission(&staff, Capability::UpdateStudentStatus));
        assert!(!gate.check_permission(&staff, Capability::DeleteClasses));
        assert!(!gate.check_permission(&staff, Capability::BulkDelete));
        assert!(!gate.check_permission(&staff, Capability::ManageTeachers));
    }

    #[test]
    fn test_viewer_has_nothing() {
        let gate = RolePermissionGate;
        assert!(!gate.check_permission(&actor(ActorRole::Viewer), Capability::AssignTeacher));
    }
}
