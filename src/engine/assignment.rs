//! 关系分配引擎
//!
//! 对外的每个方法先经过一次权限门控，再校验参数，最后才访问存储。
//! `apply_*` 系列是不做权限检查的内部操作，供批量协调器在已完成一次批量授权后逐条调用。

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::access::PermissionGate;
use super::hooks::MembershipHook;
use super::locks::ClassLocks;
use crate::errors::{Result, RosterError};
use crate::models::{
    CascadeReport,
    actors::entities::{ActorContext, Capability},
    classes::entities::Class,
    memberships::entities::{AssignStudentOutcome, RemovalStatus, RemoveStudentOutcome},
    students::entities::{Student, StudentStatus},
};
use crate::storage::Storage;
use crate::utils::validate::validate_id;

pub struct AssignmentEngine {
    storage: Arc<dyn Storage>,
    gate: Arc<dyn PermissionGate>,
    hook: Arc<dyn MembershipHook>,
    locks: ClassLocks,
}

impl AssignmentEngine {
    pub fn new(
        storage: Arc<dyn Storage>,
        gate: Arc<dyn PermissionGate>,
        hook: Arc<dyn MembershipHook>,
    ) -> Self {
        Self {
            storage,
            gate,
            hook,
            locks: ClassLocks::new(),
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// 权限检查，拒绝时返回 `PermissionDenied`
    pub fn authorize(&self, actor: &ActorContext, capability: Capability) -> Result<()> {
        if self.gate.check_permission(actor, capability) {
            Ok(())
        } else {
            warn!(
                "Actor {} ({}) denied capability {}",
                actor.actor_id, actor.role, capability
            );
            Err(RosterError::permission_denied(format!(
                "Actor {} is not allowed to {}",
                actor.actor_id, capability
            )))
        }
    }

    // 为班级分配教师（覆盖原有教师）
    pub async fn assign_teacher_to_class(
        &self,
        actor: &ActorContext,
        teacher_id: i64,
        class_id: i64,
    ) -> Result<Class> {
        self.authorize(actor, Capability::AssignTeacher)?;
        validate_id("teacher_id", teacher_id)?;
        validate_id("class_id", class_id)?;
        self.apply_assign_teacher(teacher_id, class_id).await
    }

    // 清空班级教师
    pub async fn unassign_teacher(&self, actor: &ActorContext, class_id: i64) -> Result<Class> {
        self.authorize(actor, Capability::AssignTeacher)?;
        validate_id("class_id", class_id)?;

        let _guard = self.locks.lock(class_id).await;
        let class = self
            .storage
            .set_class_teacher(class_id, None)
            .await?
            .ok_or_else(|| class_not_found(class_id))?;

        info!("Cleared teacher of class {}", class_id);
        Ok(class)
    }

    // 将学生加入班级，已是成员时 changed = false
    pub async fn assign_student_to_class(
        &self,
        actor: &ActorContext,
        student_id: i64,
        class_id: i64,
    ) -> Result<AssignStudentOutcome> {
        self.authorize(actor, Capability::AssignStudents)?;
        validate_id("student_id", student_id)?;
        validate_id("class_id", class_id)?;
        self.apply_assign_student(student_id, class_id).await
    }

    // 将学生移出班级
    pub async fn remove_student_from_class(
        &self,
        actor: &ActorContext,
        student_id: i64,
        class_id: i64,
    ) -> Result<RemoveStudentOutcome> {
        self.authorize(actor, Capability::RemoveStudents)?;
        validate_id("student_id", student_id)?;
        validate_id("class_id", class_id)?;
        self.apply_remove_student(student_id, class_id).await
    }

    // 更新学生状态（与成员关系无关）
    pub async fn update_student_status(
        &self,
        actor: &ActorContext,
        student_id: i64,
        status: StudentStatus,
    ) -> Result<Student> {
        self.authorize(actor, Capability::UpdateStudentStatus)?;
        validate_id("student_id", student_id)?;

        let student = self
            .storage
            .update_student_status(student_id, status)
            .await?
            .ok_or_else(|| student_not_found(student_id))?;

        info!("Student {} status set to {}", student_id, status);
        Ok(student)
    }

    pub async fn delete_class(&self, actor: &ActorContext, class_id: i64) -> Result<CascadeReport> {
        self.authorize(actor, Capability::DeleteClasses)?;
        validate_id("class_id", class_id)?;
        self.apply_delete_class(class_id).await
    }

    pub async fn delete_teacher(
        &self,
        actor: &ActorContext,
        teacher_id: i64,
    ) -> Result<CascadeReport> {
        self.authorize(actor, Capability::DeleteTeachers)?;
        validate_id("teacher_id", teacher_id)?;
        self.apply_delete_teacher(teacher_id).await
    }

    pub async fn delete_student(
        &self,
        actor: &ActorContext,
        student_id: i64,
    ) -> Result<CascadeReport> {
        self.authorize(actor, Capability::DeleteStudents)?;
        validate_id("student_id", student_id)?;
        self.apply_delete_student(student_id).await
    }

    pub(crate) async fn apply_assign_teacher(&self, teacher_id: i64, class_id: i64) -> Result<Class> {
        let _guard = self.locks.lock(class_id).await;

        if !self.storage.teacher_exists(teacher_id).await? {
            return Err(teacher_not_found(teacher_id));
        }

        let class = self
            .storage
            .set_class_teacher(class_id, Some(teacher_id))
            .await?
            .ok_or_else(|| class_not_found(class_id))?;

        info!("Assigned teacher {} to class {}", teacher_id, class_id);
        Ok(class)
    }

    pub(crate) async fn apply_assign_student(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<AssignStudentOutcome> {
        let _guard = self.locks.lock(class_id).await;

        if !self.storage.class_exists(class_id).await? {
            return Err(class_not_found(class_id));
        }
        if !self.storage.student_exists(student_id).await? {
            return Err(student_not_found(student_id));
        }

        let changed = self.storage.add_membership(student_id, class_id).await?;
        if changed {
            info!("Added student {} to class {}", student_id, class_id);
        } else {
            debug!("Student {} already in class {}", student_id, class_id);
        }

        Ok(AssignStudentOutcome {
            student_id,
            class_id,
            changed,
        })
    }

    pub(crate) async fn apply_remove_student(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<RemoveStudentOutcome> {
        let removed = {
            let _guard = self.locks.lock(class_id).await;

            if !self.storage.class_exists(class_id).await? {
                return Err(class_not_found(class_id));
            }
            if !self.storage.student_exists(student_id).await? {
                return Err(student_not_found(student_id));
            }

            self.storage.remove_membership(student_id, class_id).await?
        };

        if !removed {
            debug!("Student {} is not a member of class {}", student_id, class_id);
            return Ok(RemoveStudentOutcome {
                student_id,
                class_id,
                status: RemovalStatus::NotMember,
                hook_error: None,
            });
        }

        info!("Removed student {} from class {}", student_id, class_id);

        // 钩子在删除提交之后调用，失败不回滚
        let hook_error = match self.hook.on_membership_removed(student_id, class_id).await {
            Ok(()) => None,
            Err(err) => {
                let err = RosterError::external_hook(err.message());
                warn!(
                    "Membership hook failed for student {} in class {}: {}",
                    student_id,
                    class_id,
                    err.message()
                );
                Some(err.message().to_string())
            }
        };

        Ok(RemoveStudentOutcome {
            student_id,
            class_id,
            status: RemovalStatus::Removed,
            hook_error,
        })
    }

    pub(crate) async fn apply_delete_class(&self, class_id: i64) -> Result<CascadeReport> {
        let guard = self.locks.lock(class_id).await;
        let report = self
            .storage
            .delete_class(class_id)
            .await?
            .ok_or_else(|| class_not_found(class_id))?;
        self.locks.forget(class_id, guard);

        info!(
            "Deleted class {} (memberships removed: {})",
            class_id, report.memberships_removed
        );
        Ok(report)
    }

    pub(crate) async fn apply_delete_teacher(&self, teacher_id: i64) -> Result<CascadeReport> {
        let report = self
            .storage
            .delete_teacher(teacher_id)
            .await?
            .ok_or_else(|| teacher_not_found(teacher_id))?;

        info!(
            "Deleted teacher {} (classes cleared: {})",
            teacher_id, report.classes_cleared
        );
        Ok(report)
    }

    pub(crate) async fn apply_delete_student(&self, student_id: i64) -> Result<CascadeReport> {
        let report = self
            .storage
            .delete_student(student_id)
            .await?
            .ok_or_else(|| student_not_found(student_id))?;

        info!(
            "Deleted student {} (memberships removed: {})",
            student_id, report.memberships_removed
        );
        Ok(report)
    }
}

pub(crate) fn teacher_not_found(teacher_id: i64) -> RosterError {
    RosterError::not_found(format!("Teacher {teacher_id} not found"))
}

pub(crate) fn class_not_found(class_id: i64) -> RosterError {
    RosterError::not_found(format!("Class {class_id} not found"))
}

pub(crate) fn student_not_found(student_id: i64) -> RosterError {
    RosterError::not_found(format!("Student {student_id} not found"))
}
