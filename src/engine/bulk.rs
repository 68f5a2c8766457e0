//! 批量操作协调器
//!
//! 整个调用只做一次批量权限检查，然后按输入顺序逐条调用引擎的内部操作，
//! 单条失败只记入 `item_results`，不会中止后续条目。

use std::sync::Arc;

use tracing::{error, info, warn};

use super::assignment::{AssignmentEngine, class_not_found, teacher_not_found};
use crate::errors::{Result, RosterError};
use crate::models::{
    actors::entities::{ActorContext, Capability},
    bulk::{
        entities::{BulkOperation, BulkResult, ItemOutcome},
        requests::BulkDeleteKind,
    },
    memberships::entities::RemovalStatus,
};
use crate::utils::validate::{validate_id, validate_target_ids};

pub struct BulkCoordinator {
    engine: Arc<AssignmentEngine>,
    max_batch_size: usize,
}

impl BulkCoordinator {
    pub fn new(engine: Arc<AssignmentEngine>, max_batch_size: usize) -> Self {
        Self {
            engine,
            max_batch_size,
        }
    }

    pub fn engine(&self) -> &Arc<AssignmentEngine> {
        &self.engine
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// 将同一名教师分配给多个班级；教师不存在时整个调用返回 NotFound
    pub async fn bulk_assign_teacher(
        &self,
        actor: &ActorContext,
        teacher_id: i64,
        class_ids: &[i64],
    ) -> Result<BulkResult> {
        self.engine
            .authorize(actor, Capability::BulkAssignTeacher)?;
        validate_id("teacher_id", teacher_id)?;
        validate_target_ids("class_ids", class_ids, self.max_batch_size)?;

        if !self.engine.storage().teacher_exists(teacher_id).await? {
            return Err(teacher_not_found(teacher_id));
        }

        let mut result = BulkResult::new(BulkOperation::AssignTeacher, class_ids.len());
        for &class_id in class_ids {
            let outcome = match self.engine.apply_assign_teacher(teacher_id, class_id).await {
                Ok(_) => ItemOutcome::Success,
                Err(err) => item_failure(class_id, &err),
            };
            result.record(class_id, outcome);
        }

        log_summary(&result);
        Ok(result)
    }

    /// 将多名学生加入同一班级；班级不存在时整个调用返回 NotFound
    pub async fn bulk_assign_students(
        &self,
        actor: &ActorContext,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<BulkResult> {
        self.engine
            .authorize(actor, Capability::BulkAssignStudents)?;
        validate_id("class_id", class_id)?;
        validate_target_ids("student_ids", student_ids, self.max_batch_size)?;
        self.ensure_class(class_id).await?;

        let mut result = BulkResult::new(BulkOperation::AssignStudents, student_ids.len());
        for &student_id in student_ids {
            let outcome = match self.engine.apply_assign_student(student_id, class_id).await {
                Ok(assigned) if assigned.changed => ItemOutcome::Success,
                Ok(_) => ItemOutcome::AlreadyAssigned,
                Err(err) => item_failure(student_id, &err),
            };
            result.record(student_id, outcome);
        }

        log_summary(&result);
        Ok(result)
    }

    /// 将多名学生移出同一班级；钩子失败记为警告，条目仍为 success
    pub async fn bulk_remove_students(
        &self,
        actor: &ActorContext,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<BulkResult> {
        self.engine
            .authorize(actor, Capability::BulkRemoveStudents)?;
        validate_id("class_id", class_id)?;
        validate_target_ids("student_ids", student_ids, self.max_batch_size)?;
        self.ensure_class(class_id).await?;

        let mut result = BulkResult::new(BulkOperation::RemoveStudents, student_ids.len());
        for &student_id in student_ids {
            let outcome = match self.engine.apply_remove_student(student_id, class_id).await {
                Ok(removed) => {
                    if let Some(message) = removed.hook_error {
                        result.warn(student_id, "ExternalHookError", message);
                    }
                    match removed.status {
                        RemovalStatus::Removed => ItemOutcome::Success,
                        RemovalStatus::NotMember => ItemOutcome::NotMember,
                    }
                }
                Err(err) => item_failure(student_id, &err),
            };
            result.record(student_id, outcome);
        }

        log_summary(&result);
        Ok(result)
    }

    pub async fn bulk_delete_classes(
        &self,
        actor: &ActorContext,
        class_ids: &[i64],
    ) -> Result<BulkResult> {
        self.bulk_delete(actor, BulkDeleteKind::Classes, class_ids)
            .await
    }

    pub async fn bulk_delete_teachers(
        &self,
        actor: &ActorContext,
        teacher_ids: &[i64],
    ) -> Result<BulkResult> {
        self.bulk_delete(actor, BulkDeleteKind::Teachers, teacher_ids)
            .await
    }

    pub async fn bulk_delete_students(
        &self,
        actor: &ActorContext,
        student_ids: &[i64],
    ) -> Result<BulkResult> {
        self.bulk_delete(actor, BulkDeleteKind::Students, student_ids)
            .await
    }

    /// 按种类批量删除，每条都带各自的级联处理
    pub async fn bulk_delete(
        &self,
        actor: &ActorContext,
        kind: BulkDeleteKind,
        ids: &[i64],
    ) -> Result<BulkResult> {
        self.engine.authorize(actor, Capability::BulkDelete)?;
        validate_target_ids("ids", ids, self.max_batch_size)?;

        let mut result = BulkResult::new(kind.operation(), ids.len());
        for &id in ids {
            let applied = match kind {
                BulkDeleteKind::Classes => self.engine.apply_delete_class(id).await,
                BulkDeleteKind::Teachers => self.engine.apply_delete_teacher(id).await,
                BulkDeleteKind::Students => self.engine.apply_delete_student(id).await,
            };
            let outcome = match applied {
                Ok(_) => ItemOutcome::Success,
                Err(err) => item_failure(id, &err),
            };
            result.record(id, outcome);
        }

        log_summary(&result);
        Ok(result)
    }

    async fn ensure_class(&self, class_id: i64) -> Result<()> {
        if self.engine.storage().class_exists(class_id).await? {
            Ok(())
        } else {
            Err(class_not_found(class_id))
        }
    }
}

// 单条失败：NotFound 记为 not_found，其余错误记为 error
fn item_failure(target_id: i64, err: &RosterError) -> ItemOutcome {
    if err.is_not_found() {
        warn!("Bulk item {} skipped: {}", target_id, err.message());
        ItemOutcome::NotFound
    } else {
        error!("Bulk item {} failed: {}", target_id, err.format_simple());
        ItemOutcome::Error
    }
}

fn log_summary(result: &BulkResult) {
    info!(
        "Bulk {} finished: requested={}, success={}, failure={}, warnings={}",
        result.operation,
        result.requested,
        result.success_count,
        result.failure_count,
        result.warnings.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_utils::{FailingHook, FaultyStorage, Harness, admin, staff, viewer};

    #[tokio::test]
    async fn test_bulk_assign_teacher_all_valid() {
        let h = Harness::new().await;
        let teachers = h.teachers(1).await;
        let classes = h.classes(4).await;

        let result = h
            .bulk
            .bulk_assign_teacher(&admin(), teachers[0], &classes)
            .await
            .unwrap();
        assert_eq!(result.success_count, 4);
        assert_eq!(result.failure_count, 0);
        for &c in &classes {
            let class = h.storage.get_class_by_id(c).await.unwrap().unwrap();
            assert_eq!(class.teacher_id, Some(teachers[0]));
        }
    }

    #[tokio::test]
    async fn test_bulk_assign_teacher_with_missing_class() {
        let h = Harness::new().await;
        let teachers = h.teachers(7).await;
        let classes = h.classes(3).await;
        assert_eq!(teachers[6], 7);
        assert_eq!(classes, vec![1, 2, 3]);
        h.storage.delete_class(2).await.unwrap();

        let result = h
            .bulk
            .bulk_assign_teacher(&admin(), 7, &[1, 2, 3])
            .await
            .unwrap();

        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.item_results.get(1), Some(ItemOutcome::Success));
        assert_eq!(result.item_results.get(2), Some(ItemOutcome::NotFound));
        assert_eq!(result.item_results.get(3), Some(ItemOutcome::Success));
        assert_eq!(result.item_results.target_ids(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_bulk_assign_teacher_missing_teacher_aborts() {
        let h = Harness::new().await;
        let classes = h.classes(2).await;

        let err = h
            .bulk
            .bulk_assign_teacher(&admin(), 9, &classes)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        for &c in &classes {
            let class = h.storage.get_class_by_id(c).await.unwrap().unwrap();
            assert_eq!(class.teacher_id, None);
        }
    }

    #[tokio::test]
    async fn test_bulk_assign_students_counts_already_assigned_as_success() {
        let h = Harness::new().await;
        h.classes(5).await;
        h.students(11).await;
        h.storage.add_membership(11, 5).await.unwrap();

        let result = h
            .bulk
            .bulk_assign_students(&admin(), 5, &[10, 11])
            .await
            .unwrap();

        assert_eq!(result.item_results.get(10), Some(ItemOutcome::Success));
        assert_eq!(
            result.item_results.get(11),
            Some(ItemOutcome::AlreadyAssigned)
        );
        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 0);
        assert_eq!(h.storage.count_class_members(5).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_bulk_assign_students_mixed_valid_and_missing() {
        let h = Harness::new().await;
        let classes = h.classes(1).await;
        let mut targets = h.students(3).await;
        targets.extend([100, 101]);

        let result = h
            .bulk
            .bulk_assign_students(&staff(), classes[0], &targets)
            .await
            .unwrap();

        assert_eq!(result.success_count + result.failure_count, targets.len());
        assert_eq!(result.success_count, 3);
        assert_eq!(result.failure_count, 2);
        assert_eq!(result.item_results.get(100), Some(ItemOutcome::NotFound));
        assert_eq!(result.item_results.get(101), Some(ItemOutcome::NotFound));
        assert_eq!(result.item_results.len(), targets.len());
    }

    #[tokio::test]
    async fn test_bulk_assign_students_missing_class_aborts() {
        let h = Harness::new().await;
        let students = h.students(2).await;

        let err = h
            .bulk
            .bulk_assign_students(&admin(), 404, &students)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_bulk_store_error_is_recorded_per_item() {
        let storage = Arc::new(FaultyStorage::new().await);
        let h = Harness::with_storage(storage.clone());
        let class = h.classes(1).await[0];
        let students = h.students(3).await;
        storage.break_student(students[1]);

        let result = h
            .bulk
            .bulk_assign_students(&admin(), class, &students)
            .await
            .unwrap();

        assert_eq!(result.item_results.get(students[0]), Some(ItemOutcome::Success));
        assert_eq!(result.item_results.get(students[1]), Some(ItemOutcome::Error));
        assert_eq!(result.item_results.get(students[2]), Some(ItemOutcome::Success));
        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.success_count + result.failure_count, result.requested);
        assert!(h.storage.has_membership(students[2], class).await.unwrap());
        assert!(!h.storage.has_membership(students[1], class).await.unwrap());
    }

    #[tokio::test]
    async fn test_bulk_delete_store_error_does_not_abort() {
        let storage = Arc::new(FaultyStorage::new().await);
        let h = Harness::with_storage(storage.clone());
        let students = h.students(2).await;
        storage.break_student(students[0]);

        let result = h
            .bulk
            .bulk_delete_students(&admin(), &students)
            .await
            .unwrap();

        assert_eq!(result.item_results.get(students[0]), Some(ItemOutcome::Error));
        assert_eq!(result.item_results.get(students[1]), Some(ItemOutcome::Success));
        assert_eq!(result.failure_count, 1);
        assert!(h.storage.student_exists(students[0]).await.unwrap());
        assert!(!h.storage.student_exists(students[1]).await.unwrap());
    }

    #[tokio::test]
    async fn test_bulk_remove_students() {
        let h = Harness::new().await;
        let classes = h.classes(1).await;
        let students = h.students(3).await;
        h.storage.add_membership(students[0], classes[0]).await.unwrap();
        h.storage.add_membership(students[1], classes[0]).await.unwrap();

        let result = h
            .bulk
            .bulk_remove_students(&admin(), classes[0], &[students[0], students[2], 77])
            .await
            .unwrap();

        assert_eq!(result.item_results.get(students[0]), Some(ItemOutcome::Success));
        assert_eq!(
            result.item_results.get(students[2]),
            Some(ItemOutcome::NotMember)
        );
        assert_eq!(result.item_results.get(77), Some(ItemOutcome::NotFound));
        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert!(result.warnings.is_empty());
        assert_eq!(h.storage.count_class_members(classes[0]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_bulk_remove_hook_failures_become_warnings() {
        let h = Harness::with_hook(Arc::new(FailingHook)).await;
        let classes = h.classes(1).await;
        let students = h.students(2).await;
        for &s in &students {
            h.storage.add_membership(s, classes[0]).await.unwrap();
        }

        let result = h
            .bulk
            .bulk_remove_students(&admin(), classes[0], &students)
            .await
            .unwrap();

        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 0);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warnings[0].target_id, students[0]);
        assert_eq!(result.warnings[0].error_kind, "ExternalHookError");
        assert_eq!(h.storage.count_class_members(classes[0]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bulk_delete_each_kind() {
        let h = Harness::new().await;
        let teachers = h.teachers(2).await;
        let classes = h.classes(2).await;
        let students = h.students(2).await;
        h.storage.add_membership(students[0], classes[0]).await.unwrap();
        h.storage
            .set_class_teacher(classes[1], Some(teachers[0]))
            .await
            .unwrap();

        let result = h
            .bulk
            .bulk_delete_teachers(&admin(), &[teachers[0], 999])
            .await
            .unwrap();
        assert_eq!(result.operation, BulkOperation::DeleteTeachers);
        assert_eq!((result.success_count, result.failure_count), (1, 1));
        let class = h.storage.get_class_by_id(classes[1]).await.unwrap().unwrap();
        assert_eq!(class.teacher_id, None);

        let result = h
            .bulk
            .bulk_delete_classes(&admin(), &classes)
            .await
            .unwrap();
        assert_eq!(result.success_count, 2);
        assert!(!h.storage.has_membership(students[0], classes[0]).await.unwrap());

        let result = h
            .bulk
            .bulk_delete_students(&admin(), &students)
            .await
            .unwrap();
        assert_eq!(result.success_count, 2);
        assert_eq!(h.storage.count_students().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bulk_checks_permission_once() {
        let h = Harness::new().await;
        let teachers = h.teachers(1).await;
        let classes = h.classes(5).await;

        h.bulk
            .bulk_assign_teacher(&admin(), teachers[0], &classes)
            .await
            .unwrap();
        assert_eq!(h.gate.checks(), 1);
    }

    #[tokio::test]
    async fn test_bulk_operation_level_rejections() {
        let h = Harness::new().await;
        let teachers = h.teachers(1).await;
        let classes = h.classes(2).await;

        let denied = h
            .bulk
            .bulk_assign_teacher(&viewer(), teachers[0], &classes)
            .await
            .unwrap_err();
        assert_eq!(denied.error_kind(), "PermissionDenied");

        let denied = h
            .bulk
            .bulk_delete_classes(&staff(), &classes)
            .await
            .unwrap_err();
        assert_eq!(denied.error_kind(), "PermissionDenied");

        let empty = h
            .bulk
            .bulk_assign_teacher(&admin(), teachers[0], &[])
            .await
            .unwrap_err();
        assert_eq!(empty.error_kind(), "ValidationError");

        let duplicate = h
            .bulk
            .bulk_assign_teacher(&admin(), teachers[0], &[classes[0], classes[0]])
            .await
            .unwrap_err();
        assert_eq!(duplicate.error_kind(), "ValidationError");

        let oversized: Vec<i64> = (1..=51).collect();
        let too_many = h
            .bulk
            .bulk_assign_teacher(&admin(), teachers[0], &oversized)
            .await
            .unwrap_err();
        assert_eq!(too_many.error_kind(), "ValidationError");

        for &c in &classes {
            let class = h.storage.get_class_by_id(c).await.unwrap().unwrap();
            assert_eq!(class.teacher_id, None);
        }
    }
}
