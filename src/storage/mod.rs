use std::sync::Arc;

use crate::models::{
    CascadeReport,
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
    },
    common::PaginatedResponse,
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 教师管理方法
    // 创建教师
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    // 通过ID获取教师信息
    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>>;
    // 教师是否存在
    async fn teacher_exists(&self, teacher_id: i64) -> Result<bool>;
    // 列出教师
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>>;
    // 更新教师信息
    async fn update_teacher(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    // 删除教师，同一事务内清空引用它的班级 teacher_id；不存在返回 None
    async fn delete_teacher(&self, teacher_id: i64) -> Result<Option<CascadeReport>>;
    // 教师总数
    async fn count_teachers(&self) -> Result<u64>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 班级是否存在
    async fn class_exists(&self, class_id: i64) -> Result<bool>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<PaginatedResponse<Class>>;
    // 更新班级基本信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 设置（或清空）班级教师，单条条件 UPDATE；班级不存在返回 None
    async fn set_class_teacher(
        &self,
        class_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<Class>>;
    // 删除班级及其全部成员关系
    async fn delete_class(&self, class_id: i64) -> Result<Option<CascadeReport>>;
    // 班级总数
    async fn count_classes(&self) -> Result<u64>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生信息
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 学生是否存在
    async fn student_exists(&self, student_id: i64) -> Result<bool>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>>;
    // 更新学生基本信息
    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 更新学生状态
    async fn update_student_status(
        &self,
        student_id: i64,
        status: StudentStatus,
    ) -> Result<Option<Student>>;
    // 删除学生及其全部成员关系
    async fn delete_student(&self, student_id: i64) -> Result<Option<CascadeReport>>;
    // 学生总数
    async fn count_students(&self) -> Result<u64>;

    /// 成员关系方法
    // 是否存在成员关系
    async fn has_membership(&self, student_id: i64, class_id: i64) -> Result<bool>;
    // 插入成员关系（已存在时不插入），返回是否新插入
    async fn add_membership(&self, student_id: i64, class_id: i64) -> Result<bool>;
    // 删除成员关系，返回是否删除了记录
    async fn remove_membership(&self, student_id: i64, class_id: i64) -> Result<bool>;
    // 分页列出班级成员
    async fn list_class_members(
        &self,
        class_id: i64,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>>;
    // 班级成员数量
    async fn count_class_members(&self, class_id: i64) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
