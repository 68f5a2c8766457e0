//! 引擎测试用的存储夹具与假实现

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;

use super::access::{PermissionGate, RolePermissionGate};
use super::assignment::AssignmentEngine;
use super::bulk::BulkCoordinator;
use super::hooks::MembershipHook;
use crate::errors::{Result, RosterError};
use crate::models::actors::entities::{ActorContext, ActorRole, Capability};
use crate::models::CascadeReport;
use crate::models::classes::{
    entities::Class,
    requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
};
use crate::models::common::PaginatedResponse;
use crate::models::students::{
    entities::{Student, StudentStatus},
    requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
};
use crate::models::teachers::{
    entities::Teacher,
    requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;

/// 记录每次调用的钩子
#[derive(Default)]
pub struct RecordingHook {
    calls: Mutex<Vec<(i64, i64)>>,
}

impl RecordingHook {
    pub fn calls(&self) -> Vec<(i64, i64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MembershipHook for RecordingHook {
    async fn on_membership_removed(&self, student_id: i64, class_id: i64) -> Result<()> {
        self.calls.lock().unwrap().push((student_id, class_id));
        Ok(())
    }
}

/// 总是失败的钩子
pub struct FailingHook;

#[async_trait]
impl MembershipHook for FailingHook {
    async fn on_membership_removed(&self, _student_id: i64, _class_id: i64) -> Result<()> {
        Err(RosterError::external_hook("grant service unavailable"))
    }
}

/// 按角色放行并统计检查次数的门控
#[derive(Default)]
pub struct CountingGate {
    checks: AtomicUsize,
}

impl CountingGate {
    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl PermissionGate for CountingGate {
    fn check_permission(&self, actor: &ActorContext, capability: Capability) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        RolePermissionGate.check_permission(actor, capability)
    }
}

pub fn admin() -> ActorContext {
    ActorContext::new(1, ActorRole::Admin)
}

pub fn staff() -> ActorContext {
    ActorContext::new(2, ActorRole::Staff)
}

pub fn viewer() -> ActorContext {
    ActorContext::new(3, ActorRole::Viewer)
}

/// 包装真实存储，对指定学生的成员关系写入返回存储错误
pub struct FaultyStorage {
    inner: Arc<dyn Storage>,
    broken_student: AtomicI64,
}

impl FaultyStorage {
    pub async fn new() -> Self {
        Self {
            inner: Arc::new(SeaOrmStorage::new_in_memory().await.unwrap()),
            broken_student: AtomicI64::new(0),
        }
    }

    pub fn break_student(&self, student_id: i64) {
        self.broken_student.store(student_id, Ordering::SeqCst);
    }

    fn check(&self, student_id: i64) -> Result<()> {
        if self.broken_student.load(Ordering::SeqCst) == student_id {
            Err(RosterError::store("database is locked"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Storage for FaultyStorage {
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.inner.create_teacher(teacher).await
    }

    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        self.inner.get_teacher_by_id(teacher_id).await
    }

    async fn teacher_exists(&self, teacher_id: i64) -> Result<bool> {
        self.inner.teacher_exists(teacher_id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>> {
        self.inner.list_teachers_with_pagination(query).await
    }

    async fn update_teacher(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.inner.update_teacher(teacher_id, update).await
    }

    async fn delete_teacher(&self, teacher_id: i64) -> Result<Option<CascadeReport>> {
        self.inner.delete_teacher(teacher_id).await
    }

    async fn count_teachers(&self) -> Result<u64> {
        self.inner.count_teachers().await
    }

    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.inner.create_class(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.inner.get_class_by_id(class_id).await
    }

    async fn class_exists(&self, class_id: i64) -> Result<bool> {
        self.inner.class_exists(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<PaginatedResponse<Class>> {
        self.inner.list_classes_with_pagination(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.inner.update_class(class_id, update).await
    }

    async fn set_class_teacher(
        &self,
        class_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<Class>> {
        self.inner.set_class_teacher(class_id, teacher_id).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<Option<CascadeReport>> {
        self.inner.delete_class(class_id).await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.inner.count_classes().await
    }

    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.inner.create_student(student).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.inner.get_student_by_id(student_id).await
    }

    async fn student_exists(&self, student_id: i64) -> Result<bool> {
        self.inner.student_exists(student_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.inner.list_students_with_pagination(query).await
    }

    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.inner.update_student(student_id, update).await
    }

    async fn update_student_status(
        &self,
        student_id: i64,
        status: StudentStatus,
    ) -> Result<Option<Student>> {
        self.inner.update_student_status(student_id, status).await
    }

    async fn delete_student(&self, student_id: i64) -> Result<Option<CascadeReport>> {
        self.check(student_id)?;
        self.inner.delete_student(student_id).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.inner.count_students().await
    }

    async fn has_membership(&self, student_id: i64, class_id: i64) -> Result<bool> {
        self.inner.has_membership(student_id, class_id).await
    }

    async fn add_membership(&self, student_id: i64, class_id: i64) -> Result<bool> {
        self.check(student_id)?;
        self.inner.add_membership(student_id, class_id).await
    }

    async fn remove_membership(&self, student_id: i64, class_id: i64) -> Result<bool> {
        self.check(student_id)?;
        self.inner.remove_membership(student_id, class_id).await
    }

    async fn list_class_members(
        &self,
        class_id: i64,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.inner.list_class_members(class_id, query).await
    }

    async fn count_class_members(&self, class_id: i64) -> Result<u64> {
        self.inner.count_class_members(class_id).await
    }
}

pub struct Harness {
    pub storage: Arc<dyn Storage>,
    pub engine: Arc<AssignmentEngine>,
    pub bulk: BulkCoordinator,
    pub gate: Arc<CountingGate>,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_hook(Arc::new(RecordingHook::default())).await
    }

    pub async fn with_hook(hook: Arc<dyn MembershipHook>) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        Self::assemble(storage, hook)
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self::assemble(storage, Arc::new(RecordingHook::default()))
    }

    fn assemble(storage: Arc<dyn Storage>, hook: Arc<dyn MembershipHook>) -> Self {
        let gate = Arc::new(CountingGate::default());
        let engine = Arc::new(AssignmentEngine::new(storage.clone(), gate.clone(), hook));
        let bulk = BulkCoordinator::new(engine.clone(), 50);
        Self {
            storage,
            engine,
            bulk,
            gate,
        }
    }

    /// 依次创建 n 名教师，返回其 ID
    pub async fn teachers(&self, n: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let teacher = self
                .storage
                .create_teacher(CreateTeacherRequest {
                    display_name: format!("Teacher {i}"),
                    specialty: None,
                    phone: None,
                })
                .await
                .unwrap();
            ids.push(teacher.id);
        }
        ids
    }

    pub async fn classes(&self, n: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let class = self
                .storage
                .create_class(CreateClassRequest {
                    name: format!("Class {i}"),
                    description: None,
                    teacher_id: None,
                })
                .await
                .unwrap();
            ids.push(class.id);
        }
        ids
    }

    pub async fn students(&self, n: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let student = self
                .storage
                .create_student(CreateStudentRequest {
                    name: format!("Student {i}"),
                    status: None,
                })
                .await
                .unwrap();
            ids.push(student.id);
        }
        ids
    }
}
